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

/*! The NORAD SGP/SGP4/SGP8/SDP4/SDP8 analytic propagation models from
Spacetrack Report #3, with the corrections accumulated by the later reports.
All models take a [`Tle`] and a time offset in minutes from its epoch, and
return a geocentric inertial state. Positions are km and velocities km/min.
*/

use std::f64::consts::TAU;

use crate::linalg::Vector3;

pub mod common;
pub mod deep;
mod sgp;
mod sgp4;
mod sgp8;
mod sdp4;
mod sdp8;
mod tle;

pub use self::sgp::SgpState;
pub use self::sgp4::Sgp4State;
pub use self::sgp8::Sgp8State;
pub use self::sdp4::Sdp4State;
pub use self::sdp8::Sdp8State;
pub use self::tle::{ChecksumStatus, EphemerisType, Tle};

// WGS-72 era gravity and atmosphere constants of the Spacetrack models.
// Distances are in earth radii, times in minutes.
pub const E6A: f64 = 1.0E-6;
pub const XJ3: f64 = -2.53881E-6;
pub const XKMPER: f64 = 6.378135E3;
pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const AE: f64 = 1.0;
pub const CK2: f64 = 5.413079E-4;
pub const CK4: f64 = 6.2098875E-7;
pub const S_PARAM: f64 = 1.0122292801892716;
pub const QOMS2T: f64 = 1.8802791590152709e-9;
pub const XKE: f64 = 0.074366916133173408;
pub const RHO: f64 = 1.5696615E-1;

/// Returns true when the element set needs a deep-space (SDPx) model: an
/// object completing fewer than 6.4 revolutions per day, judged on the
/// un-Kozai'd mean motion.
pub fn select_ephemeris(tle: &Tle) -> bool {
    let a1 = (XKE / tle.mean_motion).powf(2.0 / 3.0);
    let r1 = tle.inclination.cos();
    let temp = CK2 * 1.5 * (r1 * r1 * 3.0 - 1.0)
        * (1.0 - tle.eccentricity * tle.eccentricity).powf(-1.5);
    let del1 = temp / (a1 * a1);
    let ao = a1 * (1.0 - del1 * (1.0 / 3.0 + del1 * (del1 * 1.654320987654321 + 1.0)));
    let delo = temp / (ao * ao);
    let xnodp = tle.mean_motion / (delo + 1.0);

    // Period above 225 minutes is deep space
    TAU / (xnodp * MINUTES_PER_DAY) >= 1.0 / 6.4
}

/// The initialized state of whichever of the five models fits an element
/// set. The deep-space models carry a resonance integrator that advances
/// with each evaluation, hence `propagate` on `&mut self` for all variants.
#[derive(Clone, Debug)]
pub enum SatModel {
    Sgp(SgpState),
    Sgp4(Sgp4State),
    Sgp8(Sgp8State),
    Sdp4(Sdp4State),
    Sdp8(Sdp8State),
}

impl SatModel {
    /// Picks and initializes a model for the element set. The SGP and
    /// xGP8 models are only used when the TLE's ephemeris-type tag asks for
    /// them; everything else gets SGP4 or SDP4 depending on the orbit
    /// period.
    pub fn init(tle: &Tle) -> Self {
        let deep_space = select_ephemeris(tle);
        match (tle.ephemeris_type, deep_space) {
            (EphemerisType::Sgp, false) => Self::Sgp(SgpState::init(tle)),
            (EphemerisType::Sgp8, false) => Self::Sgp8(Sgp8State::init(tle)),
            (EphemerisType::Sgp8 | EphemerisType::Sdp8, true) => Self::Sdp8(Sdp8State::init(tle)),
            (_, true) => Self::Sdp4(Sdp4State::init(tle)),
            (_, false) => Self::Sgp4(Sgp4State::init(tle)),
        }
    }

    /// Evaluates the model `tsince` minutes after the element epoch,
    /// returning position in km and velocity in km/min.
    pub fn propagate(&mut self, tle: &Tle, tsince: f64) -> (Vector3<f64>, Vector3<f64>) {
        match self {
            Self::Sgp(state) => state.propagate(tle, tsince),
            Self::Sgp4(state) => state.propagate(tle, tsince),
            Self::Sgp8(state) => state.propagate(tle, tsince),
            Self::Sdp4(state) => state.propagate(tle, tsince),
            Self::Sdp8(state) => state.propagate(tle, tsince),
        }
    }
}
