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
use super::deep::{dpinit, dpper, dpsec, DeepArg};
use super::tle::Tle;
use super::XKE;

/// State of the SDP4 deep-space model: the SGP4 common coefficients plus the
/// deep-space perturbation engine. The resonance integrator advances with
/// each propagation, so `propagate` takes `&mut self`.
#[derive(Clone, Debug)]
pub struct Sdp4State {
    common: CommonCoeffs,
    deep: DeepArg,
}

impl Sdp4State {
    pub fn init(tle: &Tle) -> Self {
        let (common, _init, mut deep) = common_init(tle);
        deep.sing = tle.arg_of_perigee.sin();
        deep.cosg = tle.arg_of_perigee.cos();
        dpinit(tle, &mut deep);
        Self { common, deep }
    }

    /// Evaluates the model `tsince` minutes after the element epoch,
    /// returning position in km and velocity in km/min.
    pub fn propagate(&mut self, tle: &Tle, tsince: f64) -> (Vector3<f64>, Vector3<f64>) {
        let deep = &mut self.deep;

        // Update for secular gravity and atmospheric drag
        let xmdf = tle.mean_anomaly + deep.xmdot * tsince;
        deep.omgadf = tle.arg_of_perigee + deep.omgdot * tsince;
        let xnoddf = tle.raan + deep.xnodot * tsince;
        let tsq = tsince * tsince;
        deep.xnode = xnoddf + self.common.xnodcf * tsq;
        let tempa = 1.0 - self.common.c1 * tsince;
        let tempe = tle.bstar * self.common.c4 * tsince;
        let templ = self.common.t2cof * tsq;
        deep.xn = deep.xnodp;

        // Deep-space secular effects
        deep.xll = xmdf;
        deep.t = tsince;
        dpsec(tle, deep);

        let xmdf = deep.xll;
        let a = (XKE / deep.xn).powf(2.0 / 3.0) * tempa * tempa;
        deep.em -= tempe;
        let xmam = xmdf + deep.xnodp * templ;

        // Deep-space periodic effects
        deep.xll = xmam;
        dpper(deep);

        let xmam = deep.xll;
        let xl = xmam + deep.omgadf + deep.xnode;
        position_velocity(
            deep.xnode,
            a,
            deep.em,
            &self.common,
            deep.cosio,
            deep.sinio,
            deep.xinc,
            deep.omgadf,
            xl,
        )
    }
}
