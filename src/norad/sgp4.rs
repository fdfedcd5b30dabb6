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

use crate::linalg::Vector3;

use super::common::{common_init, position_velocity, CommonCoeffs};
use super::tle::Tle;
use super::{AE, XKMPER};

const MINIMAL_E: f64 = 1e-9;

/// Precomputed state of the SGP4 near-earth model.
#[derive(Clone, Debug)]
pub struct Sgp4State {
    common: CommonCoeffs,
    aodp: f64,
    cosio: f64,
    sinio: f64,
    omgdot: f64,
    xmdot: f64,
    xnodot: f64,
    xnodp: f64,
    eta: f64,
    c5: f64,
    /// Truncated drag equations for perigees below 220 km
    simple: bool,
    d2: f64,
    d3: f64,
    d4: f64,
    delmo: f64,
    omgcof: f64,
    sinmo: f64,
    t3cof: f64,
    t4cof: f64,
    t5cof: f64,
    xmcof: f64,
}

impl Sgp4State {
    pub fn init(tle: &Tle) -> Self {
        let (common, init, deep) = common_init(tle);
        let eta = deep.aodp * tle.eccentricity * init.tsi;
        let mut eeta = tle.eccentricity * eta;

        let mut state = Self {
            common,
            aodp: deep.aodp,
            cosio: deep.cosio,
            sinio: deep.sinio,
            omgdot: deep.omgdot,
            xmdot: deep.xmdot,
            xnodot: deep.xnodot,
            xnodp: deep.xnodp,
            eta,
            c5: 0.0,
            simple: true,
            d2: 0.0,
            d3: 0.0,
            d4: 0.0,
            delmo: 0.0,
            omgcof: 0.0,
            sinmo: 0.0,
            t3cof: 0.0,
            t4cof: 0.0,
            t5cof: 0.0,
            xmcof: 0.0,
        };

        // For perigee below 220 km, the equations are truncated to linear
        // variation in sqrt(a) and quadratic variation in mean anomaly, and
        // the c3, delta omega and delta m terms are dropped.
        if deep.aodp * (1.0 - tle.eccentricity) / AE >= 220.0 / XKMPER + AE {
            state.simple = false;
            let c1sq = common.c1 * common.c1;
            let mut delmo = 1.0 + eta * tle.mean_anomaly.cos();
            delmo *= delmo * delmo;
            state.delmo = delmo;
            state.d2 = 4.0 * deep.aodp * init.tsi * c1sq;
            let temp = state.d2 * init.tsi * common.c1 / 3.0;
            state.d3 = (17.0 * deep.aodp + init.s4) * temp;
            state.d4 =
                0.5 * temp * deep.aodp * init.tsi * (221.0 * deep.aodp + 31.0 * init.s4) * common.c1;
            state.t3cof = state.d2 + 2.0 * c1sq;
            state.t4cof = 0.25 * (3.0 * state.d3 + common.c1 * (12.0 * state.d2 + 10.0 * c1sq));
            state.t5cof = 0.2
                * (3.0 * state.d4
                    + 12.0 * common.c1 * state.d3
                    + 6.0 * state.d2 * state.d2
                    + 15.0 * c1sq * (2.0 * state.d2 + c1sq));
            state.sinmo = tle.mean_anomaly.sin();
            let mut c3 = init.coef * init.tsi * init.a3ovk2 * deep.xnodp * AE * deep.sinio;
            // Zero eccentricity would divide by zero here
            if tle.eccentricity < MINIMAL_E {
                eeta = MINIMAL_E * MINIMAL_E * deep.aodp * init.tsi;
                c3 /= MINIMAL_E;
            } else {
                c3 /= tle.eccentricity;
            }
            state.xmcof = -(2.0 / 3.0) * init.coef * tle.bstar * AE / eeta;
            state.omgcof = tle.bstar * c3 * tle.arg_of_perigee.cos();
        }
        let etasq = eta * eta;
        state.c5 =
            2.0 * init.coef1 * deep.aodp * deep.betao2 * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);
        state
    }

    /// Evaluates the model `tsince` minutes after the element epoch,
    /// returning position in km and velocity in km/min.
    pub fn propagate(&self, tle: &Tle, tsince: f64) -> (Vector3<f64>, Vector3<f64>) {
        // Update for secular gravity and atmospheric drag
        let xmdf = tle.mean_anomaly + self.xmdot * tsince;
        let omgadf = tle.arg_of_perigee + self.omgdot * tsince;
        let xnoddf = tle.raan + self.xnodot * tsince;
        let mut omega = omgadf;
        let mut xmp = xmdf;
        let tsq = tsince * tsince;
        let xnode = xnoddf + self.common.xnodcf * tsq;
        let mut tempa = 1.0 - self.common.c1 * tsince;
        let mut tempe = tle.bstar * self.common.c4 * tsince;
        let mut templ = self.common.t2cof * tsq;
        if !self.simple {
            let delomg = self.omgcof * tsince;
            let mut delm = 1.0 + self.eta * xmdf.cos();
            delm = self.xmcof * (delm * delm * delm - self.delmo);
            let temp = delomg + delm;
            xmp = xmdf + temp;
            omega = omgadf - temp;
            let tcube = tsq * tsince;
            let tfour = tsince * tcube;
            tempa = tempa - self.d2 * tsq - self.d3 * tcube - self.d4 * tfour;
            tempe += tle.bstar * self.c5 * (xmp.sin() - self.sinmo);
            templ += self.t3cof * tcube + tfour * (self.t4cof + tsince * self.t5cof);
        }

        let a = self.aodp * tempa * tempa;
        let e = tle.eccentricity - tempe;
        let xl = xmp + omega + xnode + self.xnodp * templ;
        position_velocity(
            xnode,
            a,
            e,
            &self.common,
            self.cosio,
            self.sinio,
            tle.inclination,
            omega,
            xl,
        )
    }
}
