extern crate astraea;

use approx::assert_abs_diff_eq;
use astraea::cosmic::{
    eccentric_anomaly, elements_to_state, osculating_elements, OrbitalElements, StateVector,
    EARTH_GM,
};
use astraea::linalg::Vector3;
use astraea::time::Epoch;
use rstest::rstest;

#[rstest]
#[case(0.0)]
#[case(0.1)]
#[case(0.29)]
#[case(0.3)]
#[case(0.7318)]
#[case(0.95)]
fn kepler_equation_residual(#[case] ecc: f64) {
    // The solver must satisfy M = E - e sin E across both branches
    for step in 0..24 {
        let mean_anomaly = f64::from(step) * std::f64::consts::TAU / 24.0 - std::f64::consts::PI;
        let ea = eccentric_anomaly(ecc, mean_anomaly);
        assert_abs_diff_eq!(ea - ecc * ea.sin(), mean_anomaly, epsilon = 1e-8);
    }
}

#[test]
fn osculating_elements_of_a_circular_equatorial_orbit() {
    let r = 7000.0;
    let v = (EARTH_GM / r).sqrt();
    let state = StateVector::new(Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, v, 0.0));
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 3, 1);

    let el = osculating_elements(&state, EARTH_GM, epoch);
    assert_abs_diff_eq!(el.eccentricity, 0.0, epsilon = 1e-10);
    assert_abs_diff_eq!(el.inclination, 0.0, epsilon = 1e-10);
    assert_abs_diff_eq!(el.periapsis_distance, r, epsilon = 1e-6);
    assert_abs_diff_eq!(el.mean_motion, (EARTH_GM / (r * r * r)).sqrt(), epsilon = 1e-12);
}

#[test]
fn elements_round_trip_through_state() {
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 3, 1);
    let el = OrbitalElements {
        periapsis_distance: 6_678.0,
        eccentricity: 0.2,
        inclination: 0.6,
        raan: 1.1,
        arg_of_periapsis: 2.4,
        mean_anomaly: 0.8,
        mean_motion: (EARTH_GM / 8_347.5_f64.powi(3)).sqrt(),
        epoch,
    };

    let state = elements_to_state(&el, epoch);
    let back = osculating_elements(&state, EARTH_GM, epoch);

    assert_abs_diff_eq!(back.periapsis_distance, el.periapsis_distance, epsilon = 1e-3);
    assert_abs_diff_eq!(back.eccentricity, el.eccentricity, epsilon = 1e-8);
    assert_abs_diff_eq!(back.inclination, el.inclination, epsilon = 1e-8);
    assert_abs_diff_eq!(back.arg_of_periapsis, el.arg_of_periapsis, epsilon = 1e-7);
    // The forward conversion solves Kepler's equation iteratively, so the
    // recovered mean anomaly carries the solver residual
    assert_abs_diff_eq!(back.mean_anomaly, el.mean_anomaly, epsilon = 1e-3);
    assert_abs_diff_eq!(back.mean_motion, el.mean_motion, epsilon = 1e-12);
}

#[test]
fn state_vector_obeys_vis_viva() {
    let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 3, 1);
    let sma = 26_560.0;
    let el = OrbitalElements {
        periapsis_distance: sma * 0.3,
        eccentricity: 0.7,
        inclination: 1.1,
        raan: 0.4,
        arg_of_periapsis: 4.7,
        mean_anomaly: 0.0,
        mean_motion: (EARTH_GM / (sma * sma * sma)).sqrt(),
        epoch,
    };

    // Energy is conserved at every point of the two-body arc
    for minutes in [0.0_f64, 30.0, 240.0, 700.0] {
        let state = elements_to_state(&el, epoch + minutes * astraea::time::Unit::Minute);
        let specific_energy = state.vmag().powi(2) / 2.0 - EARTH_GM / state.rmag();
        assert_abs_diff_eq!(specific_energy, -EARTH_GM / (2.0 * sma), epsilon = 1e-6);
    }
}
