/*
    Astraea, orbital propagation and trajectory interpolation
    Copyright (C) 2023 The Astraea Developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::f64::consts::TAU;

use crate::errors::{
    BadLineStartSnafu, InvalidCharacterSnafu, LineTooShortSnafu, UnparsableFieldSnafu,
};
use crate::TleError;

use super::MINUTES_PER_DAY;

/// JD of 1899 Dec 31 12:00 UT, the time origin of the NORAD models.
const J1900: f64 = 2_451_545.5 - 36_525.0 - 1.0;

/// Ephemeris type tag from column 63 of the first TLE line. Published element
/// sets all carry type 0; the non-zero values only appear in internal data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EphemerisType {
    #[default]
    Default,
    Sgp,
    Sgp4,
    Sdp4,
    Sgp8,
    Sdp8,
}

impl EphemerisType {
    fn from_column(c: u8) -> Self {
        match c {
            b'1' => Self::Sgp,
            b'2' => Self::Sgp4,
            b'3' => Self::Sdp4,
            b'4' => Self::Sgp8,
            b'5' => Self::Sdp8,
            _ => Self::Default,
        }
    }
}

/// Outcome of the modulo-10 checksum of both element lines. A mismatch does
/// not invalidate the element set; plenty of hand-edited TLEs circulate with
/// stale checksums.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksumStatus {
    Ok,
    Line1Mismatch,
    Line2Mismatch,
    BothMismatch,
}

impl ChecksumStatus {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

/// A NORAD two-line element set, with all angles converted to radians and all
/// rates to radians per minute. The epoch is kept as a UTC Julian day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tle {
    /// Epoch of the elements as a Julian day on the UTC scale
    pub epoch_jd: f64,
    /// Half the first derivative of the mean motion, in rad/min^2
    pub xndt2o: f64,
    /// One sixth the second derivative of the mean motion, in rad/min^3
    pub xndd6o: f64,
    /// B* drag term, in inverse earth radii
    pub bstar: f64,
    /// Inclination in radians
    pub inclination: f64,
    /// Right ascension of the ascending node in radians
    pub raan: f64,
    /// Eccentricity, dimensionless
    pub eccentricity: f64,
    /// Argument of perigee in radians
    pub arg_of_perigee: f64,
    /// Mean anomaly at epoch in radians
    pub mean_anomaly: f64,
    /// Mean motion in rad/min
    pub mean_motion: f64,
    pub ephemeris_type: EphemerisType,
}

/// Modulo-10 checksum of a 69-column element line: digits count their value,
/// a minus sign counts one, everything else counts zero.
fn line_checksum(line: &str, line_no: u8) -> Result<bool, TleError> {
    let bytes = line.as_bytes();
    if bytes.len() < 69 {
        return LineTooShortSnafu { line: line_no }.fail();
    }
    let mut sum: u32 = 0;
    for &c in &bytes[..68] {
        if !(b' '..=b'z').contains(&c) {
            return InvalidCharacterSnafu { line: line_no }.fail();
        }
        if c.is_ascii_digit() {
            sum += u32::from(c - b'0');
        } else if c == b'-' {
            sum += 1;
        }
    }
    Ok(sum % 10 == u32::from(bytes[68].wrapping_sub(b'0')))
}

/// Decodes the implied-decimal notation of the "mean motion dot dot" and
/// "B*" fields, e.g. ` 28098-4` meaning 0.28098e-4. A blank field is zero.
fn decimal_field(line: &str, start: usize, line_no: u8, field: &'static str) -> Result<f64, TleError> {
    let bytes = &line.as_bytes()[start..start + 8];
    if bytes[1] == b' ' {
        return Ok(0.0);
    }
    let sign = if bytes[0] == b'-' { -1.0 } else { 1.0 };
    let mantissa: u32 = line[start + 1..start + 6]
        .trim()
        .parse()
        .map_err(|_| UnparsableFieldSnafu { line: line_no, field }.build())?;
    if !bytes[7].is_ascii_digit() {
        return UnparsableFieldSnafu { line: line_no, field }.fail();
    }
    let mut exponent = i32::from(bytes[7] - b'0');
    if bytes[6] == b'-' {
        exponent = -exponent;
    }
    Ok(sign * f64::from(mantissa) * 1e-5 * 10f64.powi(exponent))
}

fn float_field(
    line: &str,
    range: std::ops::Range<usize>,
    line_no: u8,
    field: &'static str,
) -> Result<f64, TleError> {
    line[range]
        .trim()
        .parse()
        .map_err(|_| UnparsableFieldSnafu { line: line_no, field }.build())
}

impl Tle {
    /// Parses a two-line element set. Structural problems are fatal; checksum
    /// mismatches are reported in the status and leave the elements usable.
    pub fn from_lines(line1: &str, line2: &str) -> Result<(Self, ChecksumStatus), TleError> {
        for (line_no, line, lead) in [(1u8, line1, '1'), (2, line2, '2')] {
            let bytes = line.as_bytes();
            if bytes.first() != Some(&(lead as u8)) || bytes.get(1) != Some(&b' ') {
                return BadLineStartSnafu { line: line_no, expected: lead }.fail();
            }
        }
        let l1_ok = line_checksum(line1, 1)?;
        let l2_ok = line_checksum(line2, 2)?;
        let status = match (l1_ok, l2_ok) {
            (true, true) => ChecksumStatus::Ok,
            (false, true) => ChecksumStatus::Line1Mismatch,
            (true, false) => ChecksumStatus::Line2Mismatch,
            (false, false) => ChecksumStatus::BothMismatch,
        };

        let deg = std::f64::consts::PI / 180.0;
        let inclination = float_field(line2, 8..16, 2, "inclination")? * deg;
        let raan = float_field(line2, 17..25, 2, "RA of ascending node")? * deg;
        // The eccentricity field carries an implied leading decimal point
        let eccentricity = float_field(line2, 26..33, 2, "eccentricity")? * 1e-7;
        let arg_of_perigee = float_field(line2, 34..42, 2, "argument of perigee")? * deg;
        let mean_anomaly = float_field(line2, 43..51, 2, "mean anomaly")? * deg;

        // Mean motion and its derivatives are published in revolutions and
        // days; convert them to radians and minutes here
        let mean_motion =
            float_field(line2, 52..63, 2, "mean motion")? * TAU / MINUTES_PER_DAY;
        let xndt2o = float_field(line1, 33..43, 1, "mean motion derivative")? * TAU
            / (MINUTES_PER_DAY * MINUTES_PER_DAY);
        let xndd6o = decimal_field(line1, 44, 1, "mean motion second derivative")? * TAU
            / (MINUTES_PER_DAY * MINUTES_PER_DAY * MINUTES_PER_DAY);
        let bstar = decimal_field(line1, 53, 1, "B* drag")?;

        // Two-digit years below 57 wrap into the 2000s
        let mut year: i32 = float_field(line1, 18..20, 1, "epoch year")? as i32;
        if year < 57 {
            year += 100;
        }
        let day_of_year = float_field(line1, 20..32, 1, "epoch day")?;
        let epoch_jd =
            day_of_year + J1900 + f64::from(year) * 365.0 + f64::from((year - 1) / 4);

        let ephemeris_type = EphemerisType::from_column(line1.as_bytes()[62]);

        Ok((
            Self {
                epoch_jd,
                xndt2o,
                xndd6o,
                bstar,
                inclination,
                raan,
                eccentricity,
                arg_of_perigee,
                mean_anomaly,
                mean_motion,
                ephemeris_type,
            },
            status,
        ))
    }
}
