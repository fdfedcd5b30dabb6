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

use super::tle::Tle;
use super::{AE, CK2, E6A, XJ3, XKE, XKMPER};

/// Precomputed state of the classical SGP model of Hilton and Kuhlman, the
/// oldest of the five models. Drag enters through the published mean motion
/// derivatives rather than B*.
#[derive(Clone, Debug)]
pub struct SgpState {
    ao: f64,
    qo: f64,
    xlo: f64,
    d1o: f64,
    d2o: f64,
    d3o: f64,
    d4o: f64,
    omgdt: f64,
    xnodot: f64,
    c5: f64,
    c6: f64,
}

impl SgpState {
    pub fn init(tle: &Tle) -> Self {
        let c1 = CK2 * 1.5;
        let c2 = CK2 / 4.0;
        let c3 = CK2 / 2.0;
        let c4 = XJ3 * (AE * AE * AE) / (CK2 * 4.0);
        let cosio = tle.inclination.cos();
        let sinio = tle.inclination.sin();
        let a1 = (XKE / tle.mean_motion).powf(2.0 / 3.0);
        let d1 = c1 / a1 / a1 * (cosio * 3.0 * cosio - 1.0)
            / (1.0 - tle.eccentricity * tle.eccentricity).powf(1.5);
        let ao = a1
            * (1.0 - d1 * (1.0 / 3.0) - d1 * d1 - d1 * 1.654320987654321 * d1 * d1);
        let po = ao * (1.0 - tle.eccentricity * tle.eccentricity);
        let qo = ao * (1.0 - tle.eccentricity);
        let xlo = tle.mean_anomaly + tle.arg_of_perigee + tle.raan;
        let d1o = c3 * sinio * sinio;
        let d2o = c2 * (cosio * 7.0 * cosio - 1.0);
        let d3o = c1 * cosio;
        let d4o = d3o * sinio;
        let po2no = tle.mean_motion / (po * po);
        let omgdt = c1 * po2no * (cosio * 5.0 * cosio - 1.0);
        let xnodot = d3o * -2.0 * po2no;
        let c5 = c4 * 0.5 * sinio * (cosio * 5.0 + 3.0) / (cosio + 1.0);
        let c6 = c4 * sinio;

        Self {
            ao,
            qo,
            xlo,
            d1o,
            d2o,
            d3o,
            d4o,
            omgdt,
            xnodot,
            c5,
            c6,
        }
    }

    /// Evaluates the model `tsince` minutes after the element epoch,
    /// returning position in km and velocity in km/min.
    pub fn propagate(&self, tle: &Tle, tsince: f64) -> (Vector3<f64>, Vector3<f64>) {
        // Secular drag from the published mean motion derivatives
        let xno = tle.mean_motion;
        let a = xno + (2.0 * tle.xndt2o + 3.0 * tle.xndd6o * tsince) * tsince;
        let a = self.ao * (xno / a).powf(2.0 / 3.0);
        let e = if a > self.qo { 1.0 - self.qo / a } else { E6A };
        let p = a * (1.0 - e * e);

        // Secular rates of node, perigee and mean longitude
        let xnodes = tle.raan + self.xnodot * tsince;
        let omgas = tle.arg_of_perigee + self.omgdt * tsince;
        let xls = fmod2p(
            self.xlo
                + (xno + self.omgdt + self.xnodot + (tle.xndt2o + tle.xndd6o * tsince) * tsince)
                    * tsince,
        );

        // Long period periodics
        let axnsl = e * omgas.cos();
        let aynsl = e * omgas.sin() - self.c6 / p;
        let xl = fmod2p(xls - self.c5 / p * axnsl);

        // Solve Kepler's equation, clamping the correction to one radian to
        // keep the iteration from diverging on extreme inputs
        let u = fmod2p(xl - xnodes);
        let mut eo1 = u;
        let mut tem5: f64 = 1.0;
        let mut sineo1 = eo1.sin();
        let mut coseo1 = eo1.cos();
        for _ in 0..=10 {
            if tem5.abs() < E6A {
                break;
            }
            tem5 = 1.0 - coseo1 * axnsl - sineo1 * aynsl;
            tem5 = (u - aynsl * coseo1 + axnsl * sineo1 - eo1) / tem5;
            let tem2 = tem5.abs();
            if tem2 > 1.0 {
                tem5 = tem2 / tem5;
            }
            eo1 += tem5;
            sineo1 = eo1.sin();
            coseo1 = eo1.cos();
        }

        // Short period preliminary quantities
        let ecose = axnsl * coseo1 + aynsl * sineo1;
        let esine = axnsl * sineo1 - aynsl * coseo1;
        let el2 = axnsl * axnsl + aynsl * aynsl;
        let pl = a * (1.0 - el2);
        let pl2 = pl * pl;
        let rr = a * (1.0 - ecose);
        let rdot = XKE * a.sqrt() * esine / rr;
        let rvdot = XKE * pl.sqrt() / rr;
        let temp = esine / ((1.0 - el2).sqrt() + 1.0);
        let sinu = a / rr * (sineo1 - aynsl - axnsl * temp);
        let cosu = a / rr * (coseo1 - axnsl + aynsl * temp);
        let su = sinu.atan2(cosu);

        // Update for short period periodics
        let sin2u = (cosu + cosu) * sinu;
        let cos2u = 1.0 - 2.0 * sinu * sinu;
        let rk = rr + self.d1o / pl * cos2u;
        let uk = su - self.d2o / pl2 * sin2u;
        let xnodek = xnodes + self.d3o * sin2u / pl2;
        let xinck = tle.inclination + self.d4o / pl2 * cos2u;

        // Orientation vectors
        let (sinuk, cosuk) = uk.sin_cos();
        let (sinik, cosik) = xinck.sin_cos();
        let (sinnok, cosnok) = xnodek.sin_cos();
        let xmx = -sinnok * cosik;
        let xmy = cosnok * cosik;
        let ux = xmx * sinuk + cosnok * cosuk;
        let uy = xmy * sinuk + sinnok * cosuk;
        let uz = sinik * sinuk;
        let vx = xmx * cosuk - cosnok * sinuk;
        let vy = xmy * cosuk - sinnok * sinuk;
        let vz = sinik * cosuk;

        let pos = Vector3::new(rk * ux * XKMPER, rk * uy * XKMPER, rk * uz * XKMPER);
        let vel = Vector3::new(
            (rdot * ux + rvdot * vx) * XKMPER,
            (rdot * uy + rvdot * vy) * XKMPER,
            (rdot * uz + rvdot * vz) * XKMPER,
        );
        (pos, vel)
    }
}
