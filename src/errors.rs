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

use snafu::Snafu;
use std::io;

/// Fatal two-line element parse errors. Checksum mismatches are _not_ errors:
/// they are reported through [`ChecksumStatus`](crate::norad::ChecksumStatus)
/// so that the caller may warn without rejecting the element set.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TleError {
    #[snafu(display("line {line} of the element set must start with '{expected}'"))]
    BadLineStart { line: u8, expected: char },
    #[snafu(display("line {line} of the element set is shorter than 69 columns"))]
    LineTooShort { line: u8 },
    #[snafu(display("line {line} of the element set contains a non-printable character"))]
    InvalidCharacter { line: u8 },
    #[snafu(display("could not parse the {field} field on line {line}"))]
    UnparsableField { line: u8, field: &'static str },
}

/// Errors raised while loading a Chebyshev polynomial ephemeris file. All of
/// these are fatal: a loader never returns a partially initialized trajectory.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EphemerisFileError {
    #[snafu(display("could not read ephemeris file: {source}"))]
    FileRead { source: io::Error },
    #[snafu(display("not a Chebyshev polynomial trajectory file (bad magic header)"))]
    BadMagic,
    #[snafu(display("ephemeris file ends before the header is complete"))]
    TruncatedHeader,
    #[snafu(display("ephemeris file declares {expected} coefficient bytes but holds {actual}"))]
    TruncatedCoefficients { expected: usize, actual: usize },
    #[snafu(display("polynomial degree {degree} exceeds the supported maximum of {max}"))]
    DegreeTooLarge { degree: u32, max: usize },
    #[snafu(display("ephemeris file declares an empty record list"))]
    NoRecords,
}

/// Errors raised when assembling a trajectory from invalid building blocks.
#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TrajectoryError {
    #[snafu(display("a composite trajectory requires at least one segment"))]
    EmptyComposite,
    #[snafu(display("segment {index} of a composite trajectory has a non-positive duration"))]
    NonPositiveDuration { index: usize },
    #[snafu(display("expected {expected} Chebyshev coefficients but {actual} were provided"))]
    CoefficientCountMismatch { expected: usize, actual: usize },
    #[snafu(display("polynomial degree {degree} exceeds the supported maximum of {max}"))]
    UnsupportedDegree { degree: usize, max: usize },
}
