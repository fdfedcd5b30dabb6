extern crate astraea;

use approx::assert_abs_diff_eq;
use astraea::time::{Epoch, Unit};
use astraea::traj::{ChebyshevTrajectory, MAX_CHEBYSHEV_DEGREE};
use astraea::{Trajectory, TrajectoryError};

fn start() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2023, 6, 1)
}

/// One granule of degree 2 whose x component is t^2 over the granule's
/// [-1, 1] parameter, using T2 = 2u^2 - 1: u^2 = (T0 + T2) / 2.
fn quadratic_granule() -> ChebyshevTrajectory {
    let coeffs = vec![
        0.5, 0.0, 0.5, // x: u^2
        1.0, 1.0, 0.0, // y: 1 + u
        2.0, 0.0, 0.0, // z: 2
    ];
    ChebyshevTrajectory::new(coeffs, 2, 1, start(), 100.0 * Unit::Second).unwrap()
}

#[test]
fn evaluates_the_polynomial_and_its_derivative() {
    let traj = quadratic_granule();

    // Middle of the granule: u = 0
    let mid = traj.state(start() + 50.0 * Unit::Second);
    assert_abs_diff_eq!(mid.position.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(mid.position.y, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(mid.position.z, 2.0, epsilon = 1e-12);
    // d(u^2)/dt = 2u * du/dt = 0 at u = 0; d(1 + u)/dt = 2/100
    assert_abs_diff_eq!(mid.velocity.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(mid.velocity.y, 0.02, epsilon = 1e-12);
    assert_abs_diff_eq!(mid.velocity.z, 0.0, epsilon = 1e-12);

    // Three quarters in: u = 0.5
    let s = traj.state(start() + 75.0 * Unit::Second);
    assert_abs_diff_eq!(s.position.x, 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(s.position.y, 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(s.velocity.x, 2.0 * 0.5 * 0.02, epsilon = 1e-12);
}

#[test]
fn clamps_outside_the_fitted_span() {
    let traj = quadratic_granule();

    let before = traj.state(start() - 1.0 * Unit::Day);
    let at_start = traj.state(start());
    let after = traj.state(start() + 1.0 * Unit::Day);
    let at_end = traj.state(start() + 100.0 * Unit::Second);

    assert_eq!(before.position, at_start.position);
    assert_eq!(after.position, at_end.position);
}

#[test]
fn continuous_across_granule_boundaries() {
    // Two granules fitted to the same global line x = t, y = z = 0:
    // per granule x(u) = offset + 50 (u + 1) with u in [-1, 1]
    let coeffs = vec![
        50.0, 50.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // granule 0
        150.0, 50.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // granule 1
    ];
    let traj = ChebyshevTrajectory::new(coeffs, 2, 2, start(), 100.0 * Unit::Second).unwrap();

    let just_before = traj.state(start() + 99.999 * Unit::Second);
    let just_after = traj.state(start() + 100.001 * Unit::Second);
    assert_abs_diff_eq!(just_before.position.x, just_after.position.x, epsilon = 1e-2);
    assert_abs_diff_eq!(just_before.velocity.x, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(just_after.velocity.x, 1.0, epsilon = 1e-9);
}

#[test]
fn bounding_sphere_encloses_sampled_positions() {
    let traj = quadratic_granule();
    let radius = traj.bounding_sphere_radius();
    for step in 0..=100 {
        let s = traj.state(start() + f64::from(step) * Unit::Second);
        assert!(s.position.norm() <= radius + 1e-9);
    }
}

#[test]
fn period_is_opt_in() {
    let mut traj = quadratic_granule();
    assert!(!traj.is_periodic());

    traj.set_period(2.0 * Unit::Hour);
    assert!(traj.is_periodic());
    assert_eq!(traj.period(), 2.0 * Unit::Hour);
}

#[test]
fn rejects_malformed_coefficients() {
    assert_eq!(
        ChebyshevTrajectory::new(vec![0.0; 9], 2, 2, start(), 100.0 * Unit::Second).unwrap_err(),
        TrajectoryError::CoefficientCountMismatch {
            expected: 18,
            actual: 9
        }
    );

    let degree = MAX_CHEBYSHEV_DEGREE + 1;
    assert_eq!(
        ChebyshevTrajectory::new(
            vec![0.0; (degree + 1) * 3],
            degree,
            1,
            start(),
            100.0 * Unit::Second
        )
        .unwrap_err(),
        TrajectoryError::UnsupportedDegree {
            degree,
            max: MAX_CHEBYSHEV_DEGREE
        }
    );
}
