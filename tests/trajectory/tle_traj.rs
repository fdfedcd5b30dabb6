extern crate astraea;

use approx::assert_abs_diff_eq;
use astraea::time::Unit;
use astraea::traj::TleTrajectory;
use astraea::{TleError, Trajectory};

use crate::{TLE11801_LINE1, TLE11801_LINE2, TLE5_LINE1, TLE5_LINE2};

#[test]
fn state_at_epoch_matches_the_model() {
    let traj = TleTrajectory::from_lines(TLE5_LINE1, TLE5_LINE2).unwrap();
    let state = traj.state(traj.epoch());

    assert_abs_diff_eq!(state.position.x, 7022.46529266, epsilon = 0.1);
    assert_abs_diff_eq!(state.position.y, -1400.08296755, epsilon = 0.1);
    assert_abs_diff_eq!(state.position.z, 0.03995155, epsilon = 0.1);
    assert_abs_diff_eq!(state.velocity.x, 1.893841015, epsilon = 1e-3);
    assert_abs_diff_eq!(state.velocity.y, 6.405893759, epsilon = 1e-3);
    assert_abs_diff_eq!(state.velocity.z, 4.534807250, epsilon = 1e-3);
}

#[test]
fn parse_errors_propagate() {
    assert_eq!(
        TleTrajectory::from_lines("garbage", TLE5_LINE2).unwrap_err(),
        TleError::BadLineStart {
            line: 1,
            expected: '1'
        }
    );
}

#[test]
fn period_and_bounding_sphere_follow_the_elements() {
    let traj = TleTrajectory::from_lines(TLE5_LINE1, TLE5_LINE2).unwrap();

    // 10.824 rev/day
    assert!(traj.is_periodic());
    assert_abs_diff_eq!(
        traj.period().to_seconds(),
        86_400.0 / 10.82419157,
        epsilon = 1e-3
    );

    // The bound must hold over several orbits
    let radius = traj.bounding_sphere_radius();
    for step in 0..48 {
        let state = traj.state(traj.epoch() + f64::from(step) * 10.0 * Unit::Minute);
        assert!(state.rmag() < radius);
    }
}

#[test]
fn switches_to_two_body_far_from_epoch() {
    let mut traj = TleTrajectory::from_lines(TLE5_LINE1, TLE5_LINE2).unwrap();
    traj.set_keplerian_approximation_limit(10 * Unit::Day);

    // The handoff to the osculating-element approximation is seamless at
    // the window edges
    for edge in [
        traj.epoch() - 10 * Unit::Day,
        traj.epoch() + 10 * Unit::Day,
    ] {
        let sgp = traj.tle_state(edge);
        let dispatched = traj.state(edge + 1.0 * Unit::Second);
        assert!(
            (sgp.position - dispatched.position).norm() < 20.0,
            "discontinuous handoff at {edge}"
        );
    }

    // Years out, the approximation still describes a plausible orbit while
    // the raw model has decayed below the surface
    let far = traj.epoch() + 3 * 365 * Unit::Day;
    let approximated = traj.state(far);
    assert!(approximated.rmag() > 6_378.0);
    assert!(approximated.rmag() < 20_000.0);
}

#[test]
fn deep_space_elements_build_a_usable_trajectory() {
    let traj = TleTrajectory::from_lines(TLE11801_LINE1, TLE11801_LINE2).unwrap();
    let radius = traj.bounding_sphere_radius();

    for step in 0..24 {
        let state = traj.state(traj.epoch() + f64::from(step) * Unit::Hour);
        assert!(state.rmag() > 6_378.0);
        assert!(state.rmag() <= radius);
    }
}

#[test]
fn clones_evaluate_independently() {
    // The model state is interior-mutable; a clone must not share it
    let traj = TleTrajectory::from_lines(TLE11801_LINE1, TLE11801_LINE2).unwrap();
    let clone = traj.clone();

    let t = traj.epoch() + 6 * Unit::Hour;
    traj.state(traj.epoch() + 40 * Unit::Day);
    let perturbed = traj.state(t);
    let fresh = clone.state(t);
    assert_abs_diff_eq!(
        (perturbed.position - fresh.position).norm(),
        0.0,
        epsilon = 1e-6
    );
}
