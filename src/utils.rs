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

use std::f64::consts::{PI, TAU};

/// Reduces an angle to the [0, 2π) range.
pub fn fmod2p(x: f64) -> f64 {
    let mut rval = x % TAU;
    if rval < 0.0 {
        rval += TAU;
    }
    rval
}

/// Reduces an angle to the (-π, π] range.
pub fn between_pm_pi(x: f64) -> f64 {
    let mut rval = fmod2p(x);
    if rval > PI {
        rval -= TAU;
    }
    rval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_reduction() {
        assert!((fmod2p(3.0 * TAU + 1.0) - 1.0).abs() < 1e-12);
        assert!((fmod2p(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert!((between_pm_pi(TAU - 0.5) - (-0.5)).abs() < 1e-12);
        assert!((between_pm_pi(0.5) - 0.5).abs() < 1e-12);
    }
}
