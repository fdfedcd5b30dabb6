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

use crate::linalg::Vector3;

mod elements;
pub use self::elements::{
    eccentric_anomaly, elements_to_state, orbit_orientation, osculating_elements, OrbitalElements,
};

/// Standard gravitational parameter of the Earth in km^3/s^2.
pub const EARTH_GM: f64 = 398_600.441_8;

/// A Cartesian position and velocity pair in an inertial equatorial frame,
/// in km and km/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    pub fn zero() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        }
    }

    /// Magnitude of the position vector in km
    pub fn rmag(&self) -> f64 {
        self.position.norm()
    }

    /// Magnitude of the velocity vector in km/s
    pub fn vmag(&self) -> f64 {
        self.velocity.norm()
    }
}
