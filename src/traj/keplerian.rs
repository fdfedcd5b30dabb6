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

use crate::cosmic::{eccentric_anomaly, orbit_orientation, OrbitalElements, StateVector};
use crate::linalg::Vector3;
use crate::time::{Duration, Epoch, Unit};
use na::UnitQuaternion;

use super::Trajectory;

/// An ideal two-body trajectory defined by a fixed set of orbital elements,
/// with the orbit plane orientation cached as a quaternion.
#[derive(Clone, Debug)]
pub struct KeplerianTrajectory {
    elements: OrbitalElements,
    orientation: UnitQuaternion<f64>,
}

impl KeplerianTrajectory {
    pub fn new(elements: OrbitalElements) -> Self {
        let orientation = orbit_orientation(
            elements.inclination,
            elements.raan,
            elements.arg_of_periapsis,
        );
        Self {
            elements,
            orientation,
        }
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }
}

impl Trajectory for KeplerianTrajectory {
    fn state(&self, epoch: Epoch) -> StateVector {
        let ecc = self.elements.eccentricity;
        let mean_anomaly = self.elements.mean_anomaly
            + self.elements.mean_motion * (epoch - self.elements.epoch).to_seconds();
        let ea = eccentric_anomaly(ecc, mean_anomaly);
        let sin_ea = ea.sin();
        let cos_ea = ea.cos();
        let w = (1.0 - ecc * ecc).max(0.0).sqrt();

        let sma = self.elements.periapsis_distance / (1.0 - ecc);
        let position = Vector3::new(sma * (cos_ea - ecc), sma * w * sin_ea, 0.0);

        let ea_dot = self.elements.mean_motion / (1.0 - ecc * cos_ea);
        let velocity = Vector3::new(-sma * sin_ea * ea_dot, sma * w * cos_ea * ea_dot, 0.0);

        StateVector::new(self.orientation * position, self.orientation * velocity)
    }

    fn bounding_sphere_radius(&self) -> f64 {
        self.elements.semi_major_axis()
    }

    fn is_periodic(&self) -> bool {
        self.elements.eccentricity < 1.0
    }

    fn period(&self) -> Duration {
        if self.elements.eccentricity >= 1.0 {
            // Hyperbolic and parabolic orbits are not periodic
            Duration::ZERO
        } else {
            (TAU / self.elements.mean_motion) * Unit::Second
        }
    }
}
