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

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::linalg::Vector3;
use crate::time::Epoch;
use na::{Unit, UnitQuaternion};

use super::StateVector;

/// Keplerian orbital elements. Distances in km, angles in radians, mean motion
/// in radians per second. The periapsis distance is stored instead of the
/// semi-major axis so that parabolic orbits remain representable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    pub periapsis_distance: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_of_periapsis: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
    pub epoch: Epoch,
}

impl OrbitalElements {
    /// Orbital period. Meaningless for parabolic and hyperbolic orbits.
    pub fn period_s(&self) -> f64 {
        TAU / self.mean_motion
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.periapsis_distance / (1.0 - self.eccentricity)
    }
}

/// Rotation taking the orbital plane frame (periapsis along +X, momentum
/// along +Z) into the inertial frame: Z(raan) * X(inc) * Z(argp).
pub fn orbit_orientation(inclination: f64, raan: f64, arg_of_periapsis: f64) -> UnitQuaternion<f64> {
    let z = Unit::new_unchecked(Vector3::z());
    let x = Unit::new_unchecked(Vector3::x());
    UnitQuaternion::from_axis_angle(&z, raan)
        * UnitQuaternion::from_axis_angle(&x, inclination)
        * UnitQuaternion::from_axis_angle(&z, arg_of_periapsis)
}

/// Solves Kepler's equation M = E - e sin E for the eccentric anomaly.
///
/// Fixed-point iteration converges too slowly above moderate eccentricities,
/// so the Laguerre-Conway method takes over at e = 0.3.
pub fn eccentric_anomaly(ecc: f64, mean_anomaly: f64) -> f64 {
    if ecc < 0.3 {
        eccentric_anomaly_standard(ecc, mean_anomaly, 5)
    } else {
        eccentric_anomaly_laguerre_conway(ecc, mean_anomaly, 8)
    }
}

fn eccentric_anomaly_standard(ecc: f64, mean_anomaly: f64, max_iterations: usize) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..max_iterations {
        ea = mean_anomaly + ecc * ea.sin();
    }
    ea
}

fn eccentric_anomaly_laguerre_conway(ecc: f64, mean_anomaly: f64, max_iterations: usize) -> f64 {
    let mut ea = mean_anomaly + 0.85 * ecc * mean_anomaly.sin().signum();
    for _ in 0..max_iterations {
        let s = ecc * ea.sin();
        let c = ecc * ea.cos();
        let z = ea - s - mean_anomaly;
        let z1 = 1.0 - c;
        let z2 = s;
        ea += -5.0 * z / (z1 + z1.signum() * (16.0 * z1 * z1 - 20.0 * z * z2).abs().sqrt());
    }
    ea
}

/// Converts an inertial state vector into the osculating Keplerian elements
/// about a body of gravitational parameter `gm` (km^3/s^2).
///
/// Degenerate geometries (zero inclination, circular, parabolic) do not have
/// well defined elements everywhere; the affected angles fall back to finite
/// defaults rather than NaN.
pub fn osculating_elements(state: &StateVector, gm: f64, epoch: Epoch) -> OrbitalElements {
    // Orbital angular momentum, normal to the orbit plane
    let h = state.position.cross(&state.velocity);

    // Line of nodes; vanishes at zero inclination
    let n = Vector3::z().cross(&h);

    let r = state.position.norm();
    let v = state.velocity.norm();
    let rv = state.position.dot(&state.velocity);
    let e_vec = ((v * v - gm / r) * state.position - rv * state.velocity) / gm;

    let ecc = e_vec.norm();
    let xi = (v * v) / 2.0 - gm / r;
    let parabolic = (1.0 - ecc).abs() < 1e-12;

    let a = -gm / (2.0 * xi);
    let periapsis_distance = if parabolic {
        h.norm_squared() / gm
    } else {
        a * (1.0 - ecc)
    };

    let h_mag = h.norm();
    let inclination = if h_mag > 0.0 {
        (h.z / h_mag).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };

    let raan = h.y.atan2(h.x) + FRAC_PI_2;

    let e_hat = if ecc > 0.0 { e_vec / ecc } else { Vector3::x() };
    let arg_of_periapsis = if n.norm() > 0.0 && ecc > 0.0 {
        let cos_w = (n.normalize().dot(&e_hat)).clamp(-1.0, 1.0);
        let mut w = cos_w.acos();
        if e_hat.z < 0.0 {
            w = TAU - w;
        }
        w
    } else {
        0.0
    };

    // True anomaly from the perifocal basis, then the eccentric anomaly
    let h_hat = if h_mag > 0.0 { h / h_mag } else { Vector3::z() };
    let u = h_hat.cross(&e_hat);
    let cos_nu = e_hat.dot(&(state.position / r));
    let sin_nu = u.dot(&(state.position / r));

    let sin_ea = sin_nu * (1.0 - ecc * ecc).max(0.0).sqrt() / (1.0 + ecc * cos_nu);
    let cos_ea = (ecc + cos_nu) / (1.0 + ecc * cos_nu);
    let ea = sin_ea.atan2(cos_ea);

    OrbitalElements {
        periapsis_distance,
        eccentricity: ecc,
        inclination,
        raan,
        arg_of_periapsis,
        mean_anomaly: ea - ecc * ea.sin(),
        mean_motion: (gm / (a * a * a).abs()).sqrt(),
        epoch,
    }
}

/// Evaluates the two-body state of an element set at the requested epoch.
pub fn elements_to_state(el: &OrbitalElements, epoch: Epoch) -> StateVector {
    let e = el.eccentricity;
    let mean_anomaly = el.mean_anomaly + el.mean_motion * (epoch - el.epoch).to_seconds();
    let ea = eccentric_anomaly(e, mean_anomaly);
    let sin_ea = ea.sin();
    let cos_ea = ea.cos();
    let w = (1.0 - e * e).max(0.0).sqrt();

    let sma = el.periapsis_distance / (1.0 - e);
    let r = Vector3::new(sma * (cos_ea - e), sma * w * sin_ea, 0.0);

    let ea_dot = el.mean_motion / (1.0 - e * cos_ea);
    let v = Vector3::new(-sma * sin_ea * ea_dot, sma * w * cos_ea * ea_dot, 0.0);

    let q = orbit_orientation(el.inclination, el.raan, el.arg_of_periapsis);
    StateVector::new(q * r, q * v)
}
