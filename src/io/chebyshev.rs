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

use std::mem::size_of;
use std::path::Path;

use bytes::Buf;
use snafu::ResultExt;

use crate::errors::{
    BadMagicSnafu, DegreeTooLargeSnafu, FileReadSnafu, NoRecordsSnafu, TruncatedCoefficientsSnafu,
    TruncatedHeaderSnafu,
};
use crate::time::{Epoch, Unit};
use crate::traj::{ChebyshevTrajectory, MAX_CHEBYSHEV_DEGREE};
use crate::{EphemerisFileError, TrajectoryError};

const MAGIC: &[u8; 8] = b"CHEBPOLY";

/// Loads a `CHEBPOLY` binary ephemeris.
///
/// The format is an 8-byte `CHEBPOLY` magic, a little-endian u32 granule
/// count, a little-endian u32 polynomial degree, the start time as an f64 of
/// TDB seconds past J2000, the granule length as an f64 of seconds, and then
/// `3 * (degree + 1)` f64 coefficients per granule in `x y z` planar order.
pub fn load_chebyshev_file<P: AsRef<Path>>(
    path: P,
) -> Result<ChebyshevTrajectory, EphemerisFileError> {
    let data = std::fs::read(path.as_ref()).context(FileReadSnafu)?;
    let mut buf = &data[..];

    if buf.remaining() < MAGIC.len() {
        return TruncatedHeaderSnafu {}.fail();
    }
    let mut magic = [0u8; 8];
    buf.copy_to_slice(&mut magic);
    if &magic != MAGIC {
        return BadMagicSnafu {}.fail();
    }

    if buf.remaining() < 2 * size_of::<u32>() + 2 * size_of::<f64>() {
        return TruncatedHeaderSnafu {}.fail();
    }
    let granule_count = buf.get_u32_le() as usize;
    let degree = buf.get_u32_le();
    let start_tdb_s = buf.get_f64_le();
    let granule_length_s = buf.get_f64_le();

    if degree as usize > MAX_CHEBYSHEV_DEGREE {
        return DegreeTooLargeSnafu {
            degree,
            max: MAX_CHEBYSHEV_DEGREE,
        }
        .fail();
    }
    if granule_count == 0 {
        return NoRecordsSnafu {}.fail();
    }

    let coeff_count = 3 * (degree as usize + 1) * granule_count;
    let expected = coeff_count * size_of::<f64>();
    if buf.remaining() < expected {
        return TruncatedCoefficientsSnafu {
            expected,
            actual: buf.remaining(),
        }
        .fail();
    }
    let mut coeffs = Vec::with_capacity(coeff_count);
    for _ in 0..coeff_count {
        coeffs.push(buf.get_f64_le());
    }

    debug!(
        "loaded {}: {} granules of degree {}, {:.1} s each from TDB J2000 {:+.1} s",
        path.as_ref().display(),
        granule_count,
        degree,
        granule_length_s,
        start_tdb_s
    );

    // The header checks above are strictly stronger than the constructor's
    match ChebyshevTrajectory::new(
        coeffs,
        degree as usize,
        granule_count,
        Epoch::from_tdb_seconds(start_tdb_s),
        granule_length_s * Unit::Second,
    ) {
        Ok(traj) => Ok(traj),
        Err(TrajectoryError::UnsupportedDegree { degree, max }) => DegreeTooLargeSnafu {
            degree: degree as u32,
            max,
        }
        .fail(),
        Err(_) => TruncatedHeaderSnafu {}.fail(),
    }
}
