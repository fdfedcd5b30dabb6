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

/*! # astraea

Orbital state propagation and trajectory interpolation for Earth satellites and
small bodies: the complete NORAD SGP/SGP4/SGP8/SDP4/SDP8 model family with
deep-space resonance handling, osculating orbital element conversion, and
Chebyshev polynomial ephemeris evaluation, all behind a single
[`Trajectory`](crate::traj::Trajectory) contract returning a position/velocity
state for any epoch.
*/

/// Provides the NORAD two-line element parser and the five SGP/SDP analytic propagation models.
pub mod norad;

/// Provides the state vector type, osculating orbital elements, and physical constants.
pub mod cosmic;

/// Provides the trajectory abstraction and its TLE, Keplerian, Chebyshev and composite implementations.
pub mod traj;

/// All the input/output needs for this library, including the Chebyshev ephemeris file loader.
pub mod io;

/// Utility functions shared by different modules.
pub mod utils;

mod errors;
pub use self::errors::{EphemerisFileError, TleError, TrajectoryError};

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{OrbitalElements, StateVector};
pub use self::traj::Trajectory;
