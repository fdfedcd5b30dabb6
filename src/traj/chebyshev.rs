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
use crate::errors::{CoefficientCountMismatchSnafu, UnsupportedDegreeSnafu};
use crate::linalg::Vector3;
use crate::time::{Duration, Epoch};
use crate::TrajectoryError;

use super::Trajectory;

pub const MAX_CHEBYSHEV_DEGREE: usize = 32;

/// A trajectory interpolated from per-granule Chebyshev polynomials, the
/// representation used by the JPL-style binary ephemerides.
///
/// Each granule covers a fixed time span and holds `degree + 1` position
/// coefficients per axis, laid out as `x0 .. xn y0 .. yn z0 .. zn`. The
/// velocity comes from the analytic derivative of the position polynomial.
/// Queries outside the fitted span clamp to the nearest endpoint.
#[derive(Clone, Debug)]
pub struct ChebyshevTrajectory {
    coeffs: Vec<f64>,
    degree: usize,
    granule_count: usize,
    start_tdb_s: f64,
    granule_length_s: f64,
    period: Duration,
    bounding_radius: f64,
}

impl ChebyshevTrajectory {
    /// Builds a trajectory from `(degree + 1) * granule_count * 3`
    /// coefficients, a start epoch and the time span of each granule.
    pub fn new(
        coeffs: Vec<f64>,
        degree: usize,
        granule_count: usize,
        start: Epoch,
        granule_length: Duration,
    ) -> Result<Self, TrajectoryError> {
        if degree > MAX_CHEBYSHEV_DEGREE {
            return UnsupportedDegreeSnafu {
                degree,
                max: MAX_CHEBYSHEV_DEGREE,
            }
            .fail();
        }
        let expected = (degree + 1) * granule_count * 3;
        if coeffs.len() != expected {
            return CoefficientCountMismatchSnafu {
                expected,
                actual: coeffs.len(),
            }
            .fail();
        }

        // Conservative bounding radius: in each granule and on each axis the
        // polynomial is within |c0| plus the sum of the remaining
        // coefficient magnitudes, since |T_n(u)| <= 1 on the granule
        let per_granule = (degree + 1) * 3;
        let mut bounding_radius: f64 = 0.0;
        for granule in coeffs.chunks_exact(per_granule) {
            let mut corner = Vector3::zeros();
            for axis in 0..3 {
                let axis_coeffs = &granule[axis * (degree + 1)..(axis + 1) * (degree + 1)];
                corner[axis] = axis_coeffs[0].abs()
                    + axis_coeffs[1..].iter().map(|c| c.abs()).sum::<f64>();
            }
            bounding_radius = bounding_radius.max(corner.norm());
        }

        Ok(Self {
            coeffs,
            degree,
            granule_count,
            start_tdb_s: start.to_tdb_seconds(),
            granule_length_s: granule_length.to_seconds(),
            period: Duration::ZERO,
            bounding_radius,
        })
    }

    pub fn start(&self) -> Epoch {
        Epoch::from_tdb_seconds(self.start_tdb_s)
    }

    pub fn end(&self) -> Epoch {
        Epoch::from_tdb_seconds(
            self.start_tdb_s + self.granule_count as f64 * self.granule_length_s,
        )
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn granule_count(&self) -> usize {
        self.granule_count
    }

    /// Marks the trajectory as periodic. Ephemeris loaders set this when the
    /// body's orbital period is known from the catalog; it is a plotting
    /// hint, not something derivable from the coefficients.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }
}

impl Trajectory for ChebyshevTrajectory {
    fn state(&self, epoch: Epoch) -> StateVector {
        let end_tdb_s = self.start_tdb_s + self.granule_count as f64 * self.granule_length_s;
        let tdb_s = epoch.to_tdb_seconds().clamp(self.start_tdb_s, end_tdb_s);

        let mut granule_index = ((tdb_s - self.start_tdb_s) / self.granule_length_s) as isize;
        let granule_start = self.start_tdb_s + self.granule_length_s * granule_index as f64;

        // The interpolation parameter u lives in [-1, 1]
        let mut u = 2.0 * (tdb_s - granule_start) / self.granule_length_s - 1.0;
        if granule_index < 0 {
            u = -1.0;
            granule_index = 0;
        } else if granule_index >= self.granule_count as isize {
            u = 1.0;
            granule_index = self.granule_count as isize - 1;
        }
        let granule_index = granule_index as usize;

        // Position terms and their derivatives
        let mut x = [0.0; MAX_CHEBYSHEV_DEGREE + 1];
        let mut v = [0.0; MAX_CHEBYSHEV_DEGREE + 1];
        x[0] = 1.0;
        x[1] = u;
        v[0] = 0.0;
        v[1] = 1.0;
        for i in 2..=self.degree {
            x[i] = 2.0 * u * x[i - 1] - x[i - 2];
            v[i] = 2.0 * u * v[i - 1] - v[i - 2] + 2.0 * x[i - 1];
        }

        let n = self.degree + 1;
        let granule = &self.coeffs[granule_index * n * 3..(granule_index + 1) * n * 3];
        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        for axis in 0..3 {
            let axis_coeffs = &granule[axis * n..(axis + 1) * n];
            for (i, c) in axis_coeffs.iter().enumerate() {
                position[axis] += c * x[i];
                velocity[axis] += c * v[i];
            }
        }

        // Chain rule for the [-1, 1] -> granule time mapping
        StateVector::new(position, velocity * (2.0 / self.granule_length_s))
    }

    fn bounding_sphere_radius(&self) -> f64 {
        self.bounding_radius
    }

    fn is_periodic(&self) -> bool {
        self.period != Duration::ZERO
    }

    fn period(&self) -> Duration {
        self.period
    }
}
