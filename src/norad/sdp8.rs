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

use std::f64::consts::PI;

use crate::linalg::Vector3;
use crate::utils::fmod2p;

use super::deep::{dpinit, dpper, dpsec, DeepArg};
use super::sgp8::vectors;
use super::tle::Tle;
use super::{AE, CK2, CK4, E6A, QOMS2T, RHO, S_PARAM, XJ3, XKE};

/// State of the SDP8 deep-space model: the SGP8 drag and short-period
/// formulation driven by the deep-space perturbation engine.
#[derive(Clone, Debug)]
pub struct Sdp8State {
    tthmun: f64,
    sinio2: f64,
    cosio2: f64,
    unm5th: f64,
    unmth2: f64,
    a3cof: f64,
    xmdt1: f64,
    xgdt1: f64,
    xhdt1: f64,
    xndt: f64,
    edot: f64,
    deep: DeepArg,
}

impl Sdp8State {
    pub fn init(tle: &Tle) -> Self {
        let mut deep = DeepArg::default();

        // Recover the original mean motion and semimajor axis from the input
        // elements, and the ballistic coefficient from the B* drag term
        let a1 = (XKE / tle.mean_motion).powf(2.0 / 3.0);
        deep.cosio = tle.inclination.cos();
        deep.theta2 = deep.cosio * deep.cosio;
        let tthmun = deep.theta2 * 3.0 - 1.0;
        deep.eosq = tle.eccentricity * tle.eccentricity;
        deep.betao2 = 1.0 - deep.eosq;
        deep.betao = deep.betao2.sqrt();
        let del1 = CK2 * 1.5 * tthmun / (a1 * a1 * deep.betao * deep.betao2);
        let ao = a1 * (1.0 - del1 * ((2.0 / 3.0) * 0.5 + del1 * (del1 * 1.654320987654321 + 1.0)));
        let delo = CK2 * 1.5 * tthmun / (ao * ao * deep.betao * deep.betao2);
        deep.aodp = ao / (1.0 - delo);
        deep.xnodp = tle.mean_motion / (delo + 1.0);
        let b = tle.bstar * 2.0 / RHO;

        let po = deep.aodp * deep.betao2;
        let pom2 = 1.0 / (po * po);
        deep.sinio = tle.inclination.sin();
        deep.sing = tle.arg_of_perigee.sin();
        deep.cosg = tle.arg_of_perigee.cos();
        let half_inclination = tle.inclination * 0.5;
        let sinio2 = half_inclination.sin();
        let cosio2 = half_inclination.cos();
        let theta4 = deep.theta2 * deep.theta2;
        let unm5th = 1.0 - deep.theta2 * 5.0;
        let unmth2 = 1.0 - deep.theta2;
        let a3cof = -XJ3 / CK2 * (AE * AE * AE);
        let pardt1 = CK2 * 3.0 * pom2 * deep.xnodp;
        let pardt2 = pardt1 * CK2 * pom2;
        let pardt4 = CK4 * 1.25 * pom2 * pom2 * deep.xnodp;
        let xmdt1 = pardt1 * 0.5 * deep.betao * tthmun;
        let xgdt1 = pardt1 * -0.5 * unm5th;
        let xhdt1 = -pardt1 * deep.cosio;
        deep.xmdot = deep.xnodp
            + xmdt1
            + pardt2 * 0.0625 * deep.betao * (13.0 - deep.theta2 * 78.0 + theta4 * 137.0);
        deep.omgdot = xgdt1
            + pardt2 * 0.0625 * (7.0 - deep.theta2 * 114.0 + theta4 * 395.0)
            + pardt4 * (3.0 - deep.theta2 * 36.0 + theta4 * 49.0);
        deep.xnodot = xhdt1
            + (pardt2 * 0.5 * (4.0 - deep.theta2 * 19.0) + pardt4 * 2.0 * (3.0 - deep.theta2 * 7.0))
                * deep.cosio;
        let tsi = 1.0 / (po - S_PARAM);
        let eta = tle.eccentricity * S_PARAM * tsi;
        let eta2 = eta * eta;
        let psim2 = (1.0 / (1.0 - eta2)).abs();
        let alpha2 = deep.eosq + 1.0;
        let eeta = tle.eccentricity * eta;
        let cos2g = deep.cosg * deep.cosg * 2.0 - 1.0;
        let d5 = tsi * psim2;
        let d1 = d5 / po;
        let d2 = eta2 * (eta2 * 4.5 + 36.0) + 12.0;
        let d3 = eta2 * (eta2 * 2.5 + 15.0);
        let d4 = eta * (eta2 * 3.75 + 5.0);
        let b1 = CK2 * tthmun;
        let b2 = -CK2 * unmth2;
        let b3 = a3cof * deep.sinio;
        let tsi_sq = tsi * tsi;
        let c0 = b * 0.5 * RHO * QOMS2T * deep.xnodp * deep.aodp * (tsi_sq * tsi_sq)
            * psim2.powf(3.5)
            / alpha2.sqrt();
        let c1 = deep.xnodp * 1.5 * (alpha2 * alpha2) * c0;
        let c4 = d1 * d3 * b2;
        let c5 = d5 * d4 * b3;
        let xndt = c1
            * (eta2 * (deep.eosq * 34.0 + 3.0)
                + 2.0
                + eeta * 5.0 * (eta2 + 4.0)
                + deep.eosq * 8.5
                + d1 * d2 * b1
                + c4 * cos2g
                + c5 * deep.sing);
        let xndtn = xndt / deep.xnodp;
        let edot = -(2.0 / 3.0) * xndtn * (1.0 - tle.eccentricity);

        dpinit(tle, &mut deep);

        Self {
            tthmun,
            sinio2,
            cosio2,
            unm5th,
            unmth2,
            a3cof,
            xmdt1,
            xgdt1,
            xhdt1,
            xndt,
            edot,
            deep,
        }
    }

    /// Evaluates the model `tsince` minutes after the element epoch,
    /// returning position in km and velocity in km/min.
    pub fn propagate(&mut self, tle: &Tle, tsince: f64) -> (Vector3<f64>, Vector3<f64>) {
        let deep = &mut self.deep;

        // Update for secular gravity and atmospheric drag
        let z1 = self.xndt * 0.5 * tsince * tsince;
        let z7 = (2.0 / 3.0) * 3.5 * z1 / deep.xnodp;
        let xmamdf = tle.mean_anomaly + deep.xmdot * tsince;
        deep.omgadf = tle.arg_of_perigee + deep.omgdot * tsince + z7 * self.xgdt1;
        deep.xnode = tle.raan + deep.xnodot * tsince + z7 * self.xhdt1;
        deep.xn = deep.xnodp;

        // Deep-space secular effects
        deep.xll = xmamdf;
        deep.t = tsince;
        dpsec(tle, deep);
        let xmamdf = deep.xll;
        deep.xn += self.xndt * tsince;
        deep.em += self.edot * tsince;
        let xmam = xmamdf + z1 + z7 * self.xmdt1;

        // Deep-space periodic effects
        deep.xll = xmam;
        dpper(deep);
        let xmam = fmod2p(deep.xll);

        // Solve Kepler's equation
        let em = deep.em;
        let mut zc2 = xmam + em * xmam.sin() * (em * xmam.cos() + 1.0);
        let mut sine = zc2.sin();
        let mut cose = zc2.cos();
        let mut zc5 = 1.0 / (1.0 - em * cose);
        for _ in 0..=10 {
            let cape = (xmam + em * sine - zc2) * zc5 + zc2;
            if (cape - zc2).abs() <= E6A {
                break;
            }
            zc2 = cape;
            sine = zc2.sin();
            cose = zc2.cos();
            zc5 = 1.0 / (1.0 - em * cose);
        }

        // Short period preliminary quantities
        let am = (XKE / deep.xn).powf(2.0 / 3.0);
        let beta2m = 1.0 - em * em;
        let sinos = deep.omgadf.sin();
        let cosos = deep.omgadf.cos();
        let axnm = em * cosos;
        let aynm = em * sinos;
        let pm = am * beta2m;
        let g1 = 1.0 / pm;
        let g2 = CK2 * 0.5 * g1;
        let g3 = g2 * g1;
        let beta = beta2m.sqrt();
        let g4 = self.a3cof * 0.25 * deep.sinio;
        let g5 = self.a3cof * 0.25 * g1;
        let snf = beta * sine * zc5;
        let csf = (cose - em) * zc5;
        let mut fm = snf.atan2(csf);
        if fm < 0.0 {
            fm += PI + PI;
        }
        let snfg = snf * cosos + csf * sinos;
        let csfg = csf * cosos - snf * sinos;
        let sn2f2g = snfg * 2.0 * csfg;
        let cs2f2g = csfg * csfg * 2.0 - 1.0;
        let ecosf = em * csf;
        let g10 = fm - xmam + em * snf;
        let rm = pm / (ecosf + 1.0);
        let aovr = am / rm;
        let g13 = deep.xn * aovr;
        let g14 = -g13 * aovr;
        let dr = g2 * (self.unmth2 * cs2f2g - self.tthmun * 3.0) - g4 * snfg;
        let diwc = g3 * 3.0 * deep.sinio * cs2f2g - g5 * aynm;
        let di = diwc * deep.cosio;
        // The perturbed inclination drives the orientation here, unlike the
        // epoch value used inside sni2du
        let sini2 = (deep.xinc * 0.5).sin();

        // Update for short period periodics
        let sni2du = self.sinio2
            * (g3 * ((1.0 - deep.theta2 * 7.0) * 0.5 * sn2f2g - self.unm5th * 3.0 * g10)
                - g5 * deep.sinio * csfg * (ecosf + 2.0))
            - g5 * 0.5 * deep.theta2 * axnm / self.cosio2;
        let xlamb = fm
            + deep.omgadf
            + deep.xnode
            + g3 * ((deep.cosio * 6.0 + 1.0 - deep.theta2 * 7.0) * 0.5 * sn2f2g
                - (self.unm5th + deep.cosio * 2.0) * 3.0 * g10)
            + g5 * deep.sinio * (deep.cosio * axnm / (deep.cosio + 1.0) - (ecosf + 2.0) * csfg);
        let y4 = sini2 * snfg + csfg * sni2du + snfg * 0.5 * self.cosio2 * di;
        let y5 = sini2 * csfg - snfg * sni2du + csfg * 0.5 * self.cosio2 * di;
        let rr = rm + dr;
        let rdot =
            deep.xn * am * em * snf / beta + g14 * (g2 * 2.0 * self.unmth2 * sn2f2g + g4 * csfg);
        let rvdot = deep.xn * (am * am) * beta / rm + g14 * dr + am * g13 * deep.sinio * diwc;

        vectors(rr, rdot, rvdot, xlamb, y4, y5)
    }
}
