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

use crate::cosmic::StateVector;
use crate::linalg::Vector3;
use crate::time::{Duration, Epoch};

mod chebyshev;
mod composite;
mod keplerian;
mod tle;

pub use self::chebyshev::{ChebyshevTrajectory, MAX_CHEBYSHEV_DEGREE};
pub use self::composite::CompositeTrajectory;
pub use self::keplerian::KeplerianTrajectory;
pub use self::tle::TleTrajectory;

/// A source of position and velocity over time.
///
/// Implementations are expected to return a well defined (if extrapolated or
/// clamped) state for any epoch, rather than fail outside their fitted span.
pub trait Trajectory {
    /// The state vector at the specified epoch, in km and km/s.
    fn state(&self, epoch: Epoch) -> StateVector;

    /// Radius of an origin-centered sphere containing the entire
    /// trajectory, in km. Used to skip evaluating objects that cannot
    /// possibly be in range.
    fn bounding_sphere_radius(&self) -> f64;

    fn is_periodic(&self) -> bool {
        false
    }

    /// The orbital period, or zero for aperiodic trajectories.
    fn period(&self) -> Duration {
        Duration::ZERO
    }

    /// Computes the full state and discards the velocity. Implementations
    /// may override this when the position alone is cheaper.
    fn position(&self, epoch: Epoch) -> Vector3<f64> {
        self.state(epoch).position
    }

    /// Computes the full state and discards the position.
    fn velocity(&self, epoch: Epoch) -> Vector3<f64> {
        self.state(epoch).velocity
    }
}
