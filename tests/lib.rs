mod ephemeris;
mod norad;
mod trajectory;

/// The Spacetrack Report #3 near-earth test satellite, also used by the
/// published SGP4 verification runs.
pub const TLE5_LINE1: &str =
    "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
pub const TLE5_LINE2: &str =
    "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

/// The Spacetrack Report #3 deep-space test satellite (a Molniya-class
/// orbit with a 12-hour resonance).
pub const TLE11801_LINE1: &str =
    "1 11801U          80230.29629788  .01431103  00000-0  14311-1      13";
pub const TLE11801_LINE2: &str =
    "2 11801  46.7916 230.4354 7318036  47.4722  10.4117  2.28537848    13";
