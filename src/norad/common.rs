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
use crate::utils::fmod2p;

use super::deep::DeepArg;
use super::tle::Tle;
use super::{AE, CK2, E6A, QOMS2T, S_PARAM, XJ3, XKE, XKMPER};

/// Coefficients shared by the SGP4 and SDP4 models, produced by
/// [`common_init`] and consumed by [`position_velocity`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonCoeffs {
    pub x3thm1: f64,
    pub x1mth2: f64,
    pub c1: f64,
    pub c4: f64,
    pub xnodcf: f64,
    pub t2cof: f64,
    pub xlcof: f64,
    pub aycof: f64,
    pub x7thm1: f64,
}

/// Intermediate initialization quantities that SGP4 needs beyond the shared
/// coefficients.
#[derive(Clone, Copy, Debug, Default)]
pub struct InitCoeffs {
    pub coef: f64,
    pub coef1: f64,
    pub tsi: f64,
    pub s4: f64,
    pub a3ovk2: f64,
    pub eta: f64,
}

/// Recovers the original (un-Kozai'd) mean motion and semimajor axis from the
/// published elements and computes the secular rates and drag coefficients
/// shared by SGP4 and SDP4. For perigees below 156 km the s and (q0 - s)^4
/// density parameters are adjusted.
pub fn common_init(tle: &Tle) -> (CommonCoeffs, InitCoeffs, DeepArg) {
    let mut common = CommonCoeffs::default();
    let mut init = InitCoeffs::default();
    let mut deep = DeepArg::default();

    let a1 = (XKE / tle.mean_motion).powf(2.0 / 3.0);
    deep.cosio = tle.inclination.cos();
    deep.theta2 = deep.cosio * deep.cosio;
    common.x3thm1 = 3.0 * deep.theta2 - 1.0;
    deep.eosq = tle.eccentricity * tle.eccentricity;
    deep.betao2 = 1.0 - deep.eosq;
    deep.betao = deep.betao2.sqrt();
    let del1 = 1.5 * CK2 * common.x3thm1 / (a1 * a1 * deep.betao * deep.betao2);
    let ao = a1 * (1.0 - del1 * (0.5 * (2.0 / 3.0) + del1 * (1.0 + 134.0 / 81.0 * del1)));
    let delo = 1.5 * CK2 * common.x3thm1 / (ao * ao * deep.betao * deep.betao2);
    deep.xnodp = tle.mean_motion / (1.0 + delo);
    deep.aodp = ao / (1.0 - delo);

    init.s4 = S_PARAM;
    let mut qoms24 = QOMS2T;
    let perige = (deep.aodp * (1.0 - tle.eccentricity) - AE) * XKMPER;
    if perige < 156.0 {
        init.s4 = if perige <= 98.0 { 20.0 } else { perige - 78.0 };
        let temp_val = (120.0 - init.s4) * AE / XKMPER;
        qoms24 = temp_val.powi(4);
        init.s4 = init.s4 / XKMPER + AE;
    }

    let pinvsq = 1.0 / (deep.aodp * deep.aodp * deep.betao2 * deep.betao2);
    init.tsi = 1.0 / (deep.aodp - init.s4);
    init.eta = deep.aodp * tle.eccentricity * init.tsi;
    let etasq = init.eta * init.eta;
    let eeta = tle.eccentricity * init.eta;
    let psisq = (1.0 - etasq).abs();
    let tsi_squared = init.tsi * init.tsi;
    init.coef = qoms24 * tsi_squared * tsi_squared;
    init.coef1 = init.coef / psisq.powf(3.5);
    let c2 = init.coef1
        * deep.xnodp
        * (deep.aodp * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
            + 0.75 * CK2 * init.tsi / psisq
                * common.x3thm1
                * (8.0 + 3.0 * etasq * (8.0 + etasq)));
    common.c1 = tle.bstar * c2;
    deep.sinio = tle.inclination.sin();
    init.a3ovk2 = -XJ3 / CK2 * AE * AE * AE;
    common.x1mth2 = 1.0 - deep.theta2;
    common.c4 = 2.0
        * deep.xnodp
        * init.coef1
        * deep.aodp
        * deep.betao2
        * (init.eta * (2.0 + 0.5 * etasq) + tle.eccentricity * (0.5 + 2.0 * etasq)
            - 2.0 * CK2 * init.tsi / (deep.aodp * psisq)
                * (-3.0 * common.x3thm1 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                    + 0.75
                        * common.x1mth2
                        * (2.0 * etasq - eeta * (1.0 + etasq))
                        * (2.0 * tle.arg_of_perigee).cos()));
    let theta4 = deep.theta2 * deep.theta2;
    let temp1 = 3.0 * CK2 * pinvsq * deep.xnodp;
    let temp2 = temp1 * CK2 * pinvsq;
    let temp3 = 1.25 * super::CK4 * pinvsq * pinvsq * deep.xnodp;
    deep.xmdot = deep.xnodp
        + 0.5 * temp1 * deep.betao * common.x3thm1
        + 0.0625 * temp2 * deep.betao * (13.0 - 78.0 * deep.theta2 + 137.0 * theta4);
    let x1m5th = 1.0 - 5.0 * deep.theta2;
    deep.omgdot = -0.5 * temp1 * x1m5th
        + 0.0625 * temp2 * (7.0 - 114.0 * deep.theta2 + 395.0 * theta4)
        + temp3 * (3.0 - 36.0 * deep.theta2 + 49.0 * theta4);
    let xhdot1 = -temp1 * deep.cosio;
    deep.xnodot = xhdot1
        + (0.5 * temp2 * (4.0 - 19.0 * deep.theta2) + 2.0 * temp3 * (3.0 - 7.0 * deep.theta2))
            * deep.cosio;
    common.xnodcf = 3.5 * deep.betao2 * xhdot1 * common.c1;
    common.t2cof = 1.5 * common.c1;
    common.xlcof =
        0.125 * init.a3ovk2 * deep.sinio * (3.0 + 5.0 * deep.cosio) / (1.0 + deep.cosio);
    common.aycof = 0.25 * init.a3ovk2 * deep.sinio;
    common.x7thm1 = 7.0 * deep.theta2 - 1.0;

    (common, init, deep)
}

/// Applies the long- and short-period periodics to the secular state and
/// produces the position (km) and velocity (km/min) vectors.
///
/// Heavily decayed satellites can end up "orbiting" inside the earth with
/// a < 0 or perigee < 0; evaluating the state there would be a math error, so
/// such cases return zero vectors instead.
#[allow(clippy::too_many_arguments)]
pub fn position_velocity(
    xnode: f64,
    a: f64,
    e: f64,
    common: &CommonCoeffs,
    cosio: f64,
    sinio: f64,
    xincl: f64,
    omega: f64,
    xl: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    // Long period periodics
    let axn = e * omega.cos();
    let temp = 1.0 / (a * (1.0 - e * e));
    let xll = temp * common.xlcof * axn;
    let aynl = temp * common.aycof;
    let xlt = xl + xll;
    let ayn = e * omega.sin() + aynl;
    let elsq = axn * axn + ayn * ayn;
    let capu = fmod2p(xlt - xnode);

    if a <= 0.0 || a * (1.0 - e) <= 0.0 || elsq >= 1.0 {
        warn!("degenerate orbit (a = {a}, e = {e}), returning a zero state");
        return (Vector3::zeros(), Vector3::zeros());
    }

    // Solve Kepler's equation
    let mut epw = capu;
    let (mut sinepw, mut cosepw) = epw.sin_cos();
    let mut temp3 = axn * sinepw;
    let mut temp4 = ayn * cosepw;
    let mut temp5 = axn * cosepw;
    let mut temp6 = ayn * sinepw;
    for _ in 0..=10 {
        let next = (capu - temp4 + temp3 - epw) / (1.0 - temp5 - temp6) + epw;
        if (next - epw).abs() <= E6A {
            break;
        }
        epw = next;
        sinepw = epw.sin();
        cosepw = epw.cos();
        temp3 = axn * sinepw;
        temp4 = ayn * cosepw;
        temp5 = axn * cosepw;
        temp6 = ayn * sinepw;
    }

    // Short period preliminary quantities
    let ecose = temp5 + temp6;
    let esine = temp3 - temp4;
    let temp = 1.0 - elsq;
    let pl = a * temp;
    let r = a * (1.0 - ecose);
    let temp1 = 1.0 / r;
    let temp2 = a * temp1;
    let betal = temp.sqrt();
    let temp3 = 1.0 / (1.0 + betal);
    let cosu = temp2 * (cosepw - axn + ayn * esine * temp3);
    let sinu = temp2 * (sinepw - ayn - axn * esine * temp3);
    let u = sinu.atan2(cosu);
    let sin2u = 2.0 * sinu * cosu;
    let cos2u = 2.0 * cosu * cosu - 1.0;
    let temp = 1.0 / pl;
    let temp1 = CK2 * temp;
    let temp2 = temp1 * temp;

    // Update for short periodics
    let rk = r * (1.0 - 1.5 * temp2 * betal * common.x3thm1) + 0.5 * temp1 * common.x1mth2 * cos2u;
    let uk = u - 0.25 * temp2 * common.x7thm1 * sin2u;
    let xnodek = xnode + 1.5 * temp2 * cosio * sin2u;
    let xinck = xincl + 1.5 * temp2 * cosio * sinio * cos2u;

    // Orientation vectors
    let (sinuk, cosuk) = uk.sin_cos();
    let (sinik, cosik) = xinck.sin_cos();
    let (sinnok, cosnok) = xnodek.sin_cos();
    let xmx = -sinnok * cosik;
    let xmy = cosnok * cosik;
    let ux = xmx * sinuk + cosnok * cosuk;
    let uy = xmy * sinuk + sinnok * cosuk;
    let uz = sinik * sinuk;

    let pos = Vector3::new(rk * ux * XKMPER, rk * uy * XKMPER, rk * uz * XKMPER);

    let rdot = XKE * a.sqrt() * esine / r;
    let rfdot = XKE * pl.sqrt() / r;
    let xn = XKE / (a * a.sqrt());
    let rdotk = rdot - xn * temp1 * common.x1mth2 * sin2u;
    let rfdotk = rfdot + xn * temp1 * (common.x1mth2 * cos2u + 1.5 * common.x3thm1);
    let vx = xmx * cosuk - cosnok * sinuk;
    let vy = xmy * cosuk - sinnok * sinuk;
    let vz = sinik * cosuk;

    let vel = Vector3::new(
        (rdotk * ux + rfdotk * vx) * XKMPER,
        (rdotk * uy + rfdotk * vy) * XKMPER,
        (rdotk * uz + rfdotk * vz) * XKMPER,
    );

    (pos, vel)
}
