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

use std::fmt;
use std::sync::Arc;

use crate::cosmic::StateVector;
use crate::errors::{EmptyCompositeSnafu, NonPositiveDurationSnafu};
use crate::time::{Duration, Epoch};
use crate::TrajectoryError;

use super::Trajectory;

/// A trajectory stitched together from a sequence of segments, each active
/// for a fixed duration from a common start epoch.
///
/// The segment boundaries are laid out back to back. Queries clamp to the
/// covered span: before the start the first segment is evaluated at the
/// start, past the end the last segment is evaluated at the end. No blending
/// is done at the seams, so the segments are expected to agree there.
pub struct CompositeTrajectory {
    segments: Vec<Arc<dyn Trajectory + Send + Sync>>,
    durations: Vec<Duration>,
    start: Epoch,
    end: Epoch,
    bounding_radius: f64,
    period: Duration,
}

impl CompositeTrajectory {
    pub fn new(
        segments: Vec<(Arc<dyn Trajectory + Send + Sync>, Duration)>,
        start: Epoch,
    ) -> Result<Self, TrajectoryError> {
        if segments.is_empty() {
            return EmptyCompositeSnafu {}.fail();
        }
        for (index, (_, duration)) in segments.iter().enumerate() {
            if *duration <= Duration::ZERO {
                return NonPositiveDurationSnafu { index }.fail();
            }
        }

        let bounding_radius = segments
            .iter()
            .map(|(segment, _)| segment.bounding_sphere_radius())
            .fold(0.0_f64, f64::max);

        // When every segment is a closed orbit, advertise the mean of their
        // periods so plotting code draws a sensible arc length
        let period = if segments.iter().all(|(segment, _)| segment.is_periodic()) {
            let total: f64 = segments
                .iter()
                .map(|(segment, _)| segment.period().to_seconds())
                .sum();
            Duration::from_seconds(total / segments.len() as f64)
        } else {
            Duration::ZERO
        };

        let (segments, durations): (Vec<_>, Vec<_>) = segments.into_iter().unzip();
        let mut end = start;
        for duration in &durations {
            end += *duration;
        }
        Ok(Self {
            segments,
            durations,
            start,
            end,
            bounding_radius,
            period,
        })
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn end(&self) -> Epoch {
        self.end
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Debug for CompositeTrajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTrajectory")
            .field("segment_count", &self.segments.len())
            .field("durations", &self.durations)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl Trajectory for CompositeTrajectory {
    fn state(&self, epoch: Epoch) -> StateVector {
        // Clamp the query to the covered span, then hand it to the first
        // segment whose cumulative end time reaches it
        let epoch = epoch.max(self.start).min(self.end);
        let mut boundary = self.start;
        for (index, duration) in self.durations.iter().enumerate() {
            boundary += *duration;
            if epoch <= boundary {
                return self.segments[index].state(epoch);
            }
        }
        // Unreachable, the clamped epoch is within the last boundary
        self.segments[self.segments.len() - 1].state(self.end)
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
