extern crate astraea;

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use astraea::io::load_chebyshev_file;
use astraea::time::Epoch;
use astraea::{EphemerisFileError, Trajectory};

/// Serializes a CHEBPOLY file: magic, granule count, degree, start time in
/// TDB seconds past J2000, granule length in seconds, then the coefficients.
fn write_chebpoly(
    name: &str,
    count: u32,
    degree: u32,
    start_tdb_s: f64,
    interval_s: f64,
    coeffs: &[f64],
) -> PathBuf {
    let mut data = Vec::new();
    data.extend_from_slice(b"CHEBPOLY");
    data.extend_from_slice(&count.to_le_bytes());
    data.extend_from_slice(&degree.to_le_bytes());
    data.extend_from_slice(&start_tdb_s.to_le_bytes());
    data.extend_from_slice(&interval_s.to_le_bytes());
    for c in coeffs {
        data.extend_from_slice(&c.to_le_bytes());
    }
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn loads_a_valid_file() {
    // One granule of degree 1: x = 10 + 5u, y = -3, z = u
    let coeffs = [10.0, 5.0, -3.0, 0.0, 0.0, 1.0];
    let path = write_chebpoly("astraea_valid.chebpoly", 1, 1, 1000.0, 200.0, &coeffs);

    let traj = load_chebyshev_file(&path).unwrap();
    assert_eq!(traj.degree(), 1);
    assert_eq!(traj.granule_count(), 1);

    // Middle of the granule, 1100 s past J2000 TDB
    let state = traj.state(Epoch::from_tdb_seconds(1100.0));
    assert_abs_diff_eq!(state.position.x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(state.position.y, -3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(state.position.z, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(state.velocity.x, 5.0 * 2.0 / 200.0, epsilon = 1e-12);
    assert_abs_diff_eq!(state.velocity.z, 2.0 / 200.0, epsilon = 1e-12);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn rejects_a_foreign_file() {
    let path = std::env::temp_dir().join("astraea_foreign.chebpoly");
    std::fs::write(&path, b"NOTCHEBPOLY AT ALL").unwrap();
    assert!(matches!(
        load_chebyshev_file(&path).unwrap_err(),
        EphemerisFileError::BadMagic
    ));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn rejects_a_truncated_header() {
    let path = std::env::temp_dir().join("astraea_short.chebpoly");
    std::fs::write(&path, b"CHEBPOLY\x01\x00").unwrap();
    assert!(matches!(
        load_chebyshev_file(&path).unwrap_err(),
        EphemerisFileError::TruncatedHeader
    ));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn rejects_truncated_coefficients() {
    // Header declares one granule of degree 1 but only half the
    // coefficients follow
    let path = write_chebpoly("astraea_trunc.chebpoly", 1, 1, 0.0, 100.0, &[1.0, 2.0, 3.0]);
    assert!(matches!(
        load_chebyshev_file(&path).unwrap_err(),
        EphemerisFileError::TruncatedCoefficients { .. }
    ));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn rejects_unsupported_degrees_and_empty_files() {
    let path = write_chebpoly("astraea_degree.chebpoly", 1, 33, 0.0, 100.0, &[]);
    assert!(matches!(
        load_chebyshev_file(&path).unwrap_err(),
        EphemerisFileError::DegreeTooLarge { degree: 33, .. }
    ));
    std::fs::remove_file(path).unwrap();

    let path = write_chebpoly("astraea_empty.chebpoly", 0, 1, 0.0, 100.0, &[]);
    assert!(matches!(
        load_chebyshev_file(&path).unwrap_err(),
        EphemerisFileError::NoRecords
    ));
    std::fs::remove_file(path).unwrap();

    assert!(matches!(
        load_chebyshev_file("/nonexistent/astraea.chebpoly").unwrap_err(),
        EphemerisFileError::FileRead { .. }
    ));
}
