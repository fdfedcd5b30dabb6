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

use std::cell::RefCell;
use std::f64::consts::TAU;

use crate::cosmic::{elements_to_state, osculating_elements, OrbitalElements, StateVector, EARTH_GM};
use crate::norad::{SatModel, Tle};
use crate::time::{Duration, Epoch, Unit};
use crate::TleError;

use super::Trajectory;

/// A trajectory backed by a NORAD two-line element set and the matching
/// SGP/SDP model.
///
/// The deep-space models mutate their resonance integrator on every
/// evaluation, so the model state lives behind a `RefCell`: a
/// `TleTrajectory` is freely movable between threads but cannot be shared
/// between them. Clone the trajectory to evaluate the same element set from
/// several threads at once.
///
/// Far away from the element epoch the SGP models fall apart; a decade of
/// drag terms will often produce an orbit that intersects the earth. Beyond
/// a configurable window (365 days by default) the trajectory switches to a
/// two-body approximation built from osculating elements taken at the edge
/// of the window, which is not accurate but preserves the overall shape of
/// the orbit.
#[derive(Clone, Debug)]
pub struct TleTrajectory {
    tle: Tle,
    model: RefCell<SatModel>,
    epoch: Epoch,
    keplerian_limit: Duration,
    keplerian_before: OrbitalElements,
    keplerian_after: OrbitalElements,
}

impl TleTrajectory {
    /// Builds the trajectory for an already parsed element set.
    pub fn new(tle: Tle) -> Self {
        let model = RefCell::new(SatModel::init(&tle));

        // The TLE epoch is a year and day-of-year on the UTC scale, held as
        // a Julian day; hifitime handles the leap-second bookkeeping from
        // there on.
        let epoch = Epoch::from_jde_utc(tle.epoch_jd);

        let mut traj = Self {
            tle,
            model,
            epoch,
            keplerian_limit: Duration::MAX,
            keplerian_before: OrbitalElements {
                periapsis_distance: 0.0,
                eccentricity: 0.0,
                inclination: 0.0,
                raan: 0.0,
                arg_of_periapsis: 0.0,
                mean_anomaly: 0.0,
                mean_motion: 0.0,
                epoch,
            },
            keplerian_after: OrbitalElements {
                periapsis_distance: 0.0,
                eccentricity: 0.0,
                inclination: 0.0,
                raan: 0.0,
                arg_of_periapsis: 0.0,
                mean_anomaly: 0.0,
                mean_motion: 0.0,
                epoch,
            },
        };
        traj.set_keplerian_approximation_limit(365 * Unit::Day);
        traj
    }

    /// Parses the two lines and builds the trajectory. A checksum mismatch
    /// is only logged; structural parse errors fail.
    pub fn from_lines(line1: &str, line2: &str) -> Result<Self, TleError> {
        let (tle, checksum) = Tle::from_lines(line1, line2)?;
        if !checksum.is_ok() {
            warn!("TLE checksum mismatch ({checksum:?}), continuing with the elements as read");
        }
        Ok(Self::new(tle))
    }

    pub fn tle(&self) -> &Tle {
        &self.tle
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Sets the offset from the TLE epoch beyond which the two-body
    /// approximation replaces the SGP/SDP model, and fits the before/after
    /// osculating elements at the edges of that window.
    pub fn set_keplerian_approximation_limit(&mut self, limit: Duration) {
        let before_epoch = self.epoch - limit;
        let after_epoch = self.epoch + limit;
        let s0 = self.tle_state(before_epoch);
        let s1 = self.tle_state(after_epoch);
        self.keplerian_before = osculating_elements(&s0, EARTH_GM, before_epoch);
        self.keplerian_after = osculating_elements(&s1, EARTH_GM, after_epoch);
        self.keplerian_limit = limit;
    }

    /// Evaluates the SGP/SDP model itself, without the Keplerian fallback.
    pub fn tle_state(&self, epoch: Epoch) -> StateVector {
        let tmin = (epoch - self.epoch).to_seconds() / 60.0;
        let (position, velocity) = self.model.borrow_mut().propagate(&self.tle, tmin);
        // The models produce km/min
        StateVector::new(position, velocity / 60.0)
    }
}

impl Trajectory for TleTrajectory {
    fn state(&self, epoch: Epoch) -> StateVector {
        if epoch < self.epoch - self.keplerian_limit {
            elements_to_state(&self.keplerian_before, epoch)
        } else if epoch > self.epoch + self.keplerian_limit {
            elements_to_state(&self.keplerian_after, epoch)
        } else {
            self.tle_state(epoch)
        }
    }

    fn bounding_sphere_radius(&self) -> f64 {
        // Semimajor axis recovered from the mean motion, with a generous
        // 10% slack since the elements evolve slightly over time
        let period_s = self.period().to_seconds();
        let sma = (EARTH_GM * period_s * period_s / (4.0 * std::f64::consts::PI.powi(2)))
            .powf(1.0 / 3.0);
        sma * (1.0 + self.tle.eccentricity) * 1.1
    }

    fn is_periodic(&self) -> bool {
        true
    }

    fn period(&self) -> Duration {
        // Mean motion is rad/min
        (TAU / self.tle.mean_motion) * Unit::Minute
    }
}
