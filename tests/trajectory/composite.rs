extern crate astraea;

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use astraea::cosmic::{OrbitalElements, EARTH_GM};
use astraea::time::{Duration, Epoch, Unit};
use astraea::traj::{CompositeTrajectory, KeplerianTrajectory};
use astraea::{Trajectory, TrajectoryError};

fn circular(sma: f64, epoch: Epoch) -> KeplerianTrajectory {
    KeplerianTrajectory::new(OrbitalElements {
        periapsis_distance: sma,
        eccentricity: 0.0,
        inclination: 0.0,
        raan: 0.0,
        arg_of_periapsis: 0.0,
        mean_anomaly: 0.0,
        mean_motion: (EARTH_GM / (sma * sma * sma)).sqrt(),
        epoch,
    })
}

#[test]
fn dispatches_to_the_active_segment() {
    let start = Epoch::from_gregorian_utc_at_midnight(2023, 6, 1);
    let inner = circular(7_000.0, start);
    let outer = circular(42_164.0, start);

    let composite = CompositeTrajectory::new(
        vec![
            (Arc::new(inner) as Arc<dyn Trajectory + Send + Sync>, 1.0 * Unit::Day),
            (Arc::new(outer) as Arc<dyn Trajectory + Send + Sync>, 1.0 * Unit::Day),
        ],
        start,
    )
    .unwrap();

    // Within the first day the inner orbit answers, past it the outer one
    assert_abs_diff_eq!(composite.state(start).rmag(), 7_000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(
        composite.state(start + 0.9 * Unit::Day).rmag(),
        7_000.0,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        composite.state(start + 1.5 * Unit::Day).rmag(),
        42_164.0,
        epsilon = 1e-6
    );
}

#[test]
fn clamps_to_the_covered_span() {
    let start = Epoch::from_gregorian_utc_at_midnight(2023, 6, 1);
    let composite = CompositeTrajectory::new(
        vec![
            (
                Arc::new(circular(7_000.0, start)) as Arc<dyn Trajectory + Send + Sync>,
                100.0 * Unit::Second,
            ),
            (
                Arc::new(circular(7_000.0, start)) as Arc<dyn Trajectory + Send + Sync>,
                100.0 * Unit::Second,
            ),
        ],
        start,
    )
    .unwrap();

    // Queries outside the span hold the exact endpoint states; position
    // equality matters here, since on a circular orbit the radius alone
    // cannot tell a clamped state from an extrapolated one
    let before = composite.state(start - 10.0 * Unit::Second);
    let at_start = composite.state(start);
    assert_eq!(before.position, at_start.position);
    assert_eq!(before.velocity, at_start.velocity);

    let after = composite.state(start + 250.0 * Unit::Second);
    let at_end = composite.state(start + 200.0 * Unit::Second);
    assert_eq!(after.position, at_end.position);
    assert_eq!(after.velocity, at_end.velocity);
}

#[test]
fn bounding_sphere_is_the_largest_segment() {
    let start = Epoch::from_gregorian_utc_at_midnight(2023, 6, 1);
    let composite = CompositeTrajectory::new(
        vec![
            (
                Arc::new(circular(7_000.0, start)) as Arc<dyn Trajectory + Send + Sync>,
                1.0 * Unit::Day,
            ),
            (
                Arc::new(circular(42_164.0, start)) as Arc<dyn Trajectory + Send + Sync>,
                1.0 * Unit::Day,
            ),
        ],
        start,
    )
    .unwrap();
    assert_abs_diff_eq!(composite.bounding_sphere_radius(), 42_164.0, epsilon = 1e-9);
}

#[test]
fn period_is_the_mean_of_periodic_segments() {
    let start = Epoch::from_gregorian_utc_at_midnight(2023, 6, 1);
    let a = circular(7_000.0, start);
    let b = circular(8_000.0, start);
    let expected = (a.period().to_seconds() + b.period().to_seconds()) / 2.0;

    let composite = CompositeTrajectory::new(
        vec![
            (Arc::new(a) as Arc<dyn Trajectory + Send + Sync>, 1.0 * Unit::Day),
            (Arc::new(b) as Arc<dyn Trajectory + Send + Sync>, 1.0 * Unit::Day),
        ],
        start,
    )
    .unwrap();
    assert!(composite.is_periodic());
    assert_abs_diff_eq!(composite.period().to_seconds(), expected, epsilon = 1e-6);
}

#[test]
fn rejects_degenerate_segment_lists() {
    let start = Epoch::from_gregorian_utc_at_midnight(2023, 6, 1);
    assert_eq!(
        CompositeTrajectory::new(vec![], start).unwrap_err(),
        TrajectoryError::EmptyComposite
    );

    let segment = Arc::new(circular(7_000.0, start)) as Arc<dyn Trajectory + Send + Sync>;
    assert_eq!(
        CompositeTrajectory::new(
            vec![(segment.clone(), 1.0 * Unit::Day), (segment, Duration::ZERO)],
            start
        )
        .unwrap_err(),
        TrajectoryError::NonPositiveDuration { index: 1 }
    );
}
