extern crate astraea;

use approx::assert_abs_diff_eq;
use astraea::norad::{ChecksumStatus, EphemerisType, Tle};
use astraea::TleError;

use crate::{TLE11801_LINE1, TLE11801_LINE2, TLE5_LINE1, TLE5_LINE2};

#[test]
fn parse_near_earth_elements() {
    let (tle, status) = Tle::from_lines(TLE5_LINE1, TLE5_LINE2).unwrap();
    assert!(status.is_ok());
    assert_eq!(tle.ephemeris_type, EphemerisType::Default);

    let deg = std::f64::consts::PI / 180.0;
    assert_abs_diff_eq!(tle.inclination, 34.2682 * deg, epsilon = 1e-12);
    assert_abs_diff_eq!(tle.raan, 348.7242 * deg, epsilon = 1e-12);
    assert_abs_diff_eq!(tle.eccentricity, 0.1859667, epsilon = 1e-12);
    assert_abs_diff_eq!(tle.arg_of_perigee, 331.7664 * deg, epsilon = 1e-12);
    assert_abs_diff_eq!(tle.mean_anomaly, 19.3264 * deg, epsilon = 1e-12);

    // 10.82419157 rev/day in rad/min
    assert_abs_diff_eq!(
        tle.mean_motion,
        10.82419157 * std::f64::consts::TAU / 1440.0,
        epsilon = 1e-12
    );

    // B* carries an implied decimal: " 28098-4" is 0.28098e-4
    assert_abs_diff_eq!(tle.bstar, 0.28098e-4, epsilon = 1e-15);
    assert_abs_diff_eq!(
        tle.xndt2o,
        0.00000023 * std::f64::consts::TAU / (1440.0 * 1440.0),
        epsilon = 1e-20
    );
    assert_abs_diff_eq!(tle.xndd6o, 0.0, epsilon = 1e-30);

    // Year 2000, day 179.78495062
    assert_abs_diff_eq!(tle.epoch_jd, 2_451_723.284_950_62, epsilon = 1e-6);
}

#[test]
fn parse_deep_space_elements() {
    let (tle, status) = Tle::from_lines(TLE11801_LINE1, TLE11801_LINE2).unwrap();
    assert!(status.is_ok());
    assert_abs_diff_eq!(tle.eccentricity, 0.7318036, epsilon = 1e-12);
    assert_abs_diff_eq!(tle.bstar, 0.14311e-1, epsilon = 1e-12);
    // 1980, day 230.29629788
    assert_abs_diff_eq!(tle.epoch_jd, 2_444_468.796_297_88, epsilon = 1e-6);
}

#[test]
fn pre_1957_years_wrap_to_2000s() {
    // Same elements, epoch years 56 and 57 land 99 years apart
    let (y56, _) = Tle::from_lines(
        "1 00005U 58002B   56179.78495062  .00000023  00000-0  28098-4 0  4753",
        TLE5_LINE2,
    )
    .unwrap();
    let (y57, _) = Tle::from_lines(
        "1 00005U 58002B   57179.78495062  .00000023  00000-0  28098-4 0  4753",
        TLE5_LINE2,
    )
    .unwrap();
    assert!(y56.epoch_jd > y57.epoch_jd);
    assert_abs_diff_eq!(y56.epoch_jd - y57.epoch_jd, 99.0 * 365.25, epsilon = 1.0);
}

#[test]
fn checksum_mismatch_is_not_fatal() {
    // Corrupt the checksum digit of each line in turn
    let mut bad1 = TLE5_LINE1.to_string();
    bad1.replace_range(68..69, "0");
    let mut bad2 = TLE5_LINE2.to_string();
    bad2.replace_range(68..69, "0");

    let (_, status) = Tle::from_lines(&bad1, TLE5_LINE2).unwrap();
    assert_eq!(status, ChecksumStatus::Line1Mismatch);
    let (_, status) = Tle::from_lines(TLE5_LINE1, &bad2).unwrap();
    assert_eq!(status, ChecksumStatus::Line2Mismatch);
    let (tle, status) = Tle::from_lines(&bad1, &bad2).unwrap();
    assert_eq!(status, ChecksumStatus::BothMismatch);

    // The elements themselves parse identically
    let (good, _) = Tle::from_lines(TLE5_LINE1, TLE5_LINE2).unwrap();
    assert_eq!(tle, good);
}

#[test]
fn structural_errors_are_fatal() {
    assert_eq!(
        Tle::from_lines(TLE5_LINE2, TLE5_LINE2).unwrap_err(),
        TleError::BadLineStart {
            line: 1,
            expected: '1'
        }
    );
    assert_eq!(
        Tle::from_lines(TLE5_LINE1, "2 00005").unwrap_err(),
        TleError::LineTooShort { line: 2 }
    );

    let mut mangled = TLE5_LINE2.to_string();
    mangled.replace_range(9..12, "x.y");
    assert!(matches!(
        Tle::from_lines(TLE5_LINE1, &mangled).unwrap_err(),
        TleError::UnparsableField { line: 2, .. }
    ));

    let mut control = TLE5_LINE1.to_string();
    control.replace_range(10..11, "\u{7}");
    assert_eq!(
        Tle::from_lines(&control, TLE5_LINE2).unwrap_err(),
        TleError::InvalidCharacter { line: 1 }
    );
}

#[test]
fn ephemeris_type_column() {
    for (tag, expected) in [
        ('0', EphemerisType::Default),
        ('1', EphemerisType::Sgp),
        ('2', EphemerisType::Sgp4),
        ('3', EphemerisType::Sdp4),
        ('4', EphemerisType::Sgp8),
        ('5', EphemerisType::Sdp8),
    ] {
        let mut line1 = TLE5_LINE1.to_string();
        line1.replace_range(62..63, &tag.to_string());
        let (tle, _) = Tle::from_lines(&line1, TLE5_LINE2).unwrap();
        assert_eq!(tle.ephemeris_type, expected);
    }
}
