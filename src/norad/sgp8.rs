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

use super::tle::Tle;
use super::{AE, CK2, CK4, E6A, MINUTES_PER_DAY, QOMS2T, RHO, S_PARAM, XJ3, XKE, XKMPER};

fn a3cof() -> f64 {
    -XJ3 / CK2 * (AE * AE * AE)
}

/// Precomputed state of the SGP8 near-earth model, which carries its own
/// atmospheric drag formulation instead of the SGP4 one.
#[derive(Clone, Debug, Default)]
pub struct Sgp8State {
    cosi: f64,
    cosio2: f64,
    ed: f64,
    edot: f64,
    gamma: f64,
    omgdt: f64,
    ovgpp: f64,
    pp: f64,
    qq: f64,
    sini: f64,
    sinio2: f64,
    theta2: f64,
    tthmun: f64,
    unm5th: f64,
    unmth2: f64,
    xgdt1: f64,
    xhdt1: f64,
    xlldot: f64,
    xmdt1: f64,
    xnd: f64,
    xndt: f64,
    xnodot: f64,
    xnodp: f64,
    /// Truncated drag equations when the mean motion decay is tiny
    simple: bool,
}

impl Sgp8State {
    pub fn init(tle: &Tle) -> Self {
        let mut st = Self::default();

        // Recover the original mean motion and semimajor axis from the input
        // elements, and the ballistic coefficient from the B* drag term
        let a1 = (XKE / tle.mean_motion).powf(2.0 / 3.0);
        let eosq = tle.eccentricity * tle.eccentricity;
        let betao2 = 1.0 - eosq;
        let betao = betao2.sqrt();
        let b = tle.bstar * 2.0 / RHO;
        let sing = tle.arg_of_perigee.sin();
        let cosg = tle.arg_of_perigee.cos();
        let cos2g = cosg * cosg * 2.0 - 1.0;
        let half_inclination = tle.inclination * 0.5;

        st.cosi = tle.inclination.cos();
        st.theta2 = st.cosi * st.cosi;
        st.tthmun = st.theta2 * 3.0 - 1.0;
        let del1 = CK2 * 1.5 * st.tthmun / (a1 * a1 * betao * betao2);
        let ao = a1 * (1.0 - del1 * ((2.0 / 3.0) * 0.5 + del1 * (del1 * 1.654320987654321 + 1.0)));
        let delo = CK2 * 1.5 * st.tthmun / (ao * ao * betao * betao2);
        let aodp = ao / (1.0 - delo);
        st.xnodp = tle.mean_motion / (delo + 1.0);

        let po = aodp * betao2;
        let pom2 = 1.0 / (po * po);
        st.sini = tle.inclination.sin();
        st.sinio2 = half_inclination.sin();
        st.cosio2 = half_inclination.cos();
        let theta4 = st.theta2 * st.theta2;
        st.unm5th = 1.0 - st.theta2 * 5.0;
        st.unmth2 = 1.0 - st.theta2;
        let pardt1 = CK2 * 3.0 * pom2 * st.xnodp;
        let pardt2 = pardt1 * CK2 * pom2;
        let pardt4 = CK4 * 1.25 * pom2 * pom2 * st.xnodp;
        st.xmdt1 = pardt1 * 0.5 * betao * st.tthmun;
        st.xgdt1 = pardt1 * -0.5 * st.unm5th;
        st.xhdt1 = -pardt1 * st.cosi;
        st.xlldot =
            st.xnodp + st.xmdt1 + pardt2 * 0.0625 * betao * (13.0 - st.theta2 * 78.0 + theta4 * 137.0);
        st.omgdt = st.xgdt1
            + pardt2 * 0.0625 * (7.0 - st.theta2 * 114.0 + theta4 * 395.0)
            + pardt4 * (3.0 - st.theta2 * 36.0 + theta4 * 49.0);
        st.xnodot = st.xhdt1
            + (pardt2 * 0.5 * (4.0 - st.theta2 * 19.0) + pardt4 * 2.0 * (3.0 - st.theta2 * 7.0))
                * st.cosi;
        let tsi = 1.0 / (po - S_PARAM);
        let eta = tle.eccentricity * S_PARAM * tsi;
        let eta2 = eta * eta;
        let psim2 = (1.0 / (1.0 - eta2)).abs();
        let alpha2 = eosq + 1.0;
        let eeta = tle.eccentricity * eta;
        let d5 = tsi * psim2;
        let d1 = d5 / po;
        let d2 = eta2 * (eta2 * 4.5 + 36.0) + 12.0;
        let d3 = eta2 * (eta2 * 2.5 + 15.0);
        let d4 = eta * (eta2 * 3.75 + 5.0);
        let b1 = CK2 * st.tthmun;
        let b2 = -CK2 * st.unmth2;
        let b3 = a3cof() * st.sini;
        let tsi_sq = tsi * tsi;
        let c0 = b * 0.5 * RHO * QOMS2T * st.xnodp * aodp * (tsi_sq * tsi_sq) * psim2.powf(3.5)
            / alpha2.sqrt();
        let c1 = st.xnodp * 1.5 * (alpha2 * alpha2) * c0;
        let c4 = d1 * d3 * b2;
        let c5 = d5 * d4 * b3;
        st.xndt = c1
            * (eta2 * (eosq * 34.0 + 3.0)
                + 2.0
                + eeta * 5.0 * (eta2 + 4.0)
                + eosq * 8.5
                + d1 * d2 * b1
                + c4 * cos2g
                + c5 * sing);
        let xndtn = st.xndt / st.xnodp;

        // If drag is very small, the equations are truncated to linear
        // variation in mean motion and quadratic variation in mean anomaly
        if (xndtn * MINUTES_PER_DAY).abs() > 0.00216 {
            let eo = tle.eccentricity;
            let d6 = eta * (eta2 * 22.5 + 30.0);
            let d7 = eta * (eta2 * 12.5 + 5.0);
            let d8 = eta2 * (eta2 + 6.75) + 1.0;
            let d9 = eta * (eosq * 68.0 + 6.0) + eo * (eta2 * 15.0 + 20.0);
            let d10 = eta * 5.0 * (eta2 + 4.0) + eo * (eta2 * 68.0 + 17.0);
            let d11 = eta * (eta2 * 18.0 + 72.0);
            let d12 = eta * (eta2 * 10.0 + 30.0);
            let d13 = eta2 * 11.25 + 5.0;
            let d20 = (2.0 / 3.0) * 0.5 * xndtn;
            let c8 = d1 * d7 * b2;
            let c9 = d5 * d8 * b3;
            // st.edot is still zero here, matching the evaluation order of
            // the original model
            let tsdtts = aodp * 2.0 * tsi * (d20 * betao2 + eo * st.edot);
            let sin2g = sing * 2.0 * cosg;

            st.simple = false;
            st.edot = -c0
                * (eta * (eta2 + 4.0 + eosq * (eta2 * 7.0 + 15.5))
                    + eo * (eta2 * 15.0 + 5.0)
                    + d1 * d6 * b1
                    + c8 * cos2g
                    + c9 * sing);
            let aldtal = eo * st.edot / alpha2;
            let etdt = (st.edot + eo * tsdtts) * tsi * S_PARAM;
            let psdtps = -eta * etdt * psim2;
            let c0dtc0 = d20 + tsdtts * 4.0 - aldtal - psdtps * 7.0;
            let c1dtc1 = xndtn + aldtal * 4.0 + c0dtc0;
            let d14 = tsdtts - psdtps * 2.0;
            let d15 = (d20 + eo * st.edot / betao2) * 2.0;
            let d1dt = d1 * (d14 + d15);
            let d2dt = etdt * d11;
            let d3dt = etdt * d12;
            let d4dt = etdt * d13;
            let d5dt = d5 * d14;
            let c4dt = b2 * (d1dt * d3 + d1 * d3dt);
            let c5dt = b3 * (d5dt * d4 + d5 * d4dt);
            let d16 = d9 * etdt
                + d10 * st.edot
                + b1 * (d1dt * d2 + d1 * d2dt)
                + c4dt * cos2g
                + c5dt * sing
                + st.xgdt1 * (c5 * cosg - c4 * 2.0 * sin2g);
            let xnddt = c1dtc1 * st.xndt + c1 * d16;
            let eddot = c0dtc0 * st.edot
                - c0 * ((eta2 * 3.0 + 4.0 + eeta * 30.0 + eosq * (eta2 * 21.0 + 15.5)) * etdt
                    + (eta2 * 15.0 + 5.0 + eeta * (eta2 * 14.0 + 31.0)) * st.edot
                    + b1 * (d1dt * d6 + d1 * etdt * (eta2 * 67.5 + 30.0))
                    + b2 * (d1dt * d7 + d1 * etdt * (eta2 * 37.5 + 5.0)) * cos2g
                    + b3 * (d5dt * d8 + d5 * etdt * eta * (eta2 * 4.0 + 13.5)) * sing
                    + st.xgdt1 * (c9 * cosg - c8 * 2.0 * sin2g));
            let d25 = st.edot * st.edot;
            let d17 = xnddt / st.xnodp - xndtn * xndtn;
            let tsddts = tsdtts * 2.0 * (tsdtts - d20)
                + aodp
                    * tsi
                    * ((2.0 / 3.0) * betao2 * d17 - d20 * 4.0 * eo * st.edot
                        + (d25 + eo * eddot) * 2.0);
            let etddt = (eddot + st.edot * 2.0 * tsdtts) * tsi * S_PARAM + tsddts * eta;
            let d18 = tsddts - tsdtts * tsdtts;
            let d19 = -(psdtps * psdtps) / eta2 - eta * etddt * psim2 - psdtps * psdtps;
            let d23 = etdt * etdt;
            let d1ddt = d1dt * (d14 + d15)
                + d1 * (d18 - d19 * 2.0
                    + (2.0 / 3.0) * d17
                    + (alpha2 * d25 / betao2 + eo * eddot) * 2.0 / betao2);
            let xntrdt = st.xndt
                * ((2.0 / 3.0) * 2.0 * d17 + (d25 + eo * eddot) * 3.0 / alpha2
                    - aldtal * aldtal * 6.0
                    + d18 * 4.0
                    - d19 * 7.0)
                + c1dtc1 * xnddt
                + c1 * (c1dtc1 * d16
                    + d9 * etddt
                    + d10 * eddot
                    + d23 * (eeta * 30.0 + 6.0 + eosq * 68.0)
                    + etdt * st.edot * (eta2 * 30.0 + 40.0 + eeta * 272.0)
                    + d25 * (eta2 * 68.0 + 17.0)
                    + b1 * (d1ddt * d2 + d1dt * 2.0 * d2dt
                        + d1 * (etddt * d11 + d23 * (eta2 * 54.0 + 72.0)))
                    + b2 * (d1ddt * d3 + d1dt * 2.0 * d3dt
                        + d1 * (etddt * d12 + d23 * (eta2 * 30.0 + 30.0)))
                        * cos2g
                    + b3 * ((d5dt * d14 + d5 * (d18 - d19 * 2.0)) * d4
                        + d4dt * 2.0 * d5dt
                        + d5 * (etddt * d13 + eta * 22.5 * d23))
                        * sing
                    + st.xgdt1
                        * ((d20 * 7.0 + eo * 4.0 * st.edot / betao2)
                            * (c5 * cosg - c4 * 2.0 * sin2g)
                            + (c5dt * 2.0 * cosg - c4dt * 4.0 * sin2g
                                - st.xgdt1 * (c5 * sing + c4 * 4.0 * cos2g))));
            let tmnddt = xnddt * 1e9;
            let temp = tmnddt * tmnddt - st.xndt * 1e18 * xntrdt;
            st.pp = (temp + tmnddt * tmnddt) / temp;
            st.gamma = -xntrdt / (xnddt * (st.pp - 2.0));
            st.xnd = st.xndt / (st.pp * st.gamma);
            st.qq = 1.0 - eddot / (st.edot * st.gamma);
            st.ed = st.edot / (st.qq * st.gamma);
            st.ovgpp = 1.0 / (st.gamma * (st.pp + 1.0));
        } else {
            st.simple = true;
            st.edot = -(2.0 / 3.0) * xndtn * (1.0 - tle.eccentricity);
        }
        st
    }

    /// Evaluates the model `tsince` minutes after the element epoch,
    /// returning position in km and velocity in km/min.
    pub fn propagate(&self, tle: &Tle, tsince: f64) -> (Vector3<f64>, Vector3<f64>) {
        // Update for secular gravity and atmospheric drag
        let mut xmam = fmod2p(tle.mean_anomaly + self.xlldot * tsince);
        let mut omgasm = tle.arg_of_perigee + self.omgdt * tsince;
        let mut xnodes = tle.raan + self.xnodot * tsince;
        let (xn, em, z1);
        if !self.simple {
            let temp = 1.0 - self.gamma * tsince;
            let temp1 = temp.powf(self.pp);
            xn = self.xnodp + self.xnd * (1.0 - temp1);
            em = tle.eccentricity + self.ed * (1.0 - temp.powf(self.qq));
            z1 = self.xnd * (tsince + self.ovgpp * (temp * temp1 - 1.0));
        } else {
            xn = self.xnodp + self.xndt * tsince;
            em = tle.eccentricity + self.edot * tsince;
            z1 = self.xndt * 0.5 * tsince * tsince;
        }

        let z7 = (2.0 / 3.0) * 3.5 * z1 / self.xnodp;
        xmam = fmod2p(xmam + z1 + z7 * self.xmdt1);
        omgasm += z7 * self.xgdt1;
        xnodes += z7 * self.xhdt1;

        let (rr, rdot, rvdot, xlamb, y4, y5) = self.short_periodics(xn, em, xmam, omgasm, xnodes);
        vectors(rr, rdot, rvdot, xlamb, y4, y5)
    }

    /// Kepler solve and short-period periodics.
    fn short_periodics(
        &self,
        xn: f64,
        em: f64,
        xmam: f64,
        omgasm: f64,
        xnodes: f64,
    ) -> (f64, f64, f64, f64, f64, f64) {
        let sini2 = self.sinio2;
        // Solve Kepler's equation
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
        let am = (XKE / xn).powf(2.0 / 3.0);
        let beta2m = 1.0 - em * em;
        let sinos = omgasm.sin();
        let cosos = omgasm.cos();
        let axnm = em * cosos;
        let aynm = em * sinos;
        let pm = am * beta2m;
        let g1 = 1.0 / pm;
        let g2 = CK2 * 0.5 * g1;
        let g3 = g2 * g1;
        let beta = beta2m.sqrt();
        let g4 = a3cof() * 0.25 * self.sini;
        let g5 = a3cof() * 0.25 * g1;
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
        let g13 = xn * aovr;
        let g14 = -g13 * aovr;
        let dr = g2 * (self.unmth2 * cs2f2g - self.tthmun * 3.0) - g4 * snfg;
        let diwc = g3 * 3.0 * self.sini * cs2f2g - g5 * aynm;
        let di = diwc * self.cosi;

        // Update for short period periodics
        let sni2du = self.sinio2
            * (g3 * ((1.0 - self.theta2 * 7.0) * 0.5 * sn2f2g - self.unm5th * 3.0 * g10)
                - g5 * self.sini * csfg * (ecosf + 2.0))
            - g5 * 0.5 * self.theta2 * axnm / self.cosio2;
        let xlamb = fm
            + omgasm
            + xnodes
            + g3 * ((self.cosi * 6.0 + 1.0 - self.theta2 * 7.0) * 0.5 * sn2f2g
                - (self.unm5th + self.cosi * 2.0) * 3.0 * g10)
            + g5 * self.sini * (self.cosi * axnm / (self.cosi + 1.0) - (ecosf + 2.0) * csfg);
        let y4 = sini2 * snfg + csfg * sni2du + snfg * 0.5 * self.cosio2 * di;
        let y5 = sini2 * csfg - snfg * sni2du + csfg * 0.5 * self.cosio2 * di;
        let rr = rm + dr;
        let rdot = xn * am * em * snf / beta + g14 * (g2 * 2.0 * self.unmth2 * sn2f2g + g4 * csfg);
        let rvdot = xn * (am * am) * beta / rm + g14 * dr + am * g13 * self.sini * diwc;

        (rr, rdot, rvdot, xlamb, y4, y5)
    }
}

/// Builds the position (km) and velocity (km/min) vectors from the SGP8-style
/// orientation parameterization.
pub(super) fn vectors(
    rr: f64,
    rdot: f64,
    rvdot: f64,
    xlamb: f64,
    y4: f64,
    y5: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let snlamb = xlamb.sin();
    let cslamb = xlamb.cos();
    let temp = (y5 * snlamb - y4 * cslamb) * 2.0;
    let ux = y4 * temp + cslamb;
    let vx = y5 * temp - snlamb;
    let temp = (y5 * cslamb + y4 * snlamb) * 2.0;
    let uy = -y4 * temp + snlamb;
    let vy = -y5 * temp + cslamb;
    let temp = (1.0 - y4 * y4 - y5 * y5).sqrt() * 2.0;
    let uz = y4 * temp;
    let vz = y5 * temp;

    let pos = Vector3::new(rr * ux * XKMPER, rr * uy * XKMPER, rr * uz * XKMPER);
    let vel = Vector3::new(
        (rdot * ux + rvdot * vx) * XKMPER,
        (rdot * uy + rvdot * vy) * XKMPER,
        (rdot * uz + rvdot * vz) * XKMPER,
    );
    (pos, vel)
}
