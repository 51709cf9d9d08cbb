//! Property builders and a closure harness shared by the unit tests.

use crate::closure::ClosureContext;
use crate::fields::FlowFields;
use crate::fluxes::Switches;
use crate::interface::InterfaceCache;
use pc_config::{
    MixingRuleDef, MixtureDef, PhaseChangeDef, PhaseChangeProperties, SaturationDef,
    SpreadWeightingDef,
};
use pc_mesh::{PolyMesh, ScalarField, SerialReduction};
use pc_thermo::{ConstantSaturation, ThermalMixture};
use std::collections::BTreeMap;

pub(crate) const T_SAT: f64 = 373.15;
pub(crate) const P_SAT: f64 = 101_325.0;

pub(crate) fn saturation_def() -> SaturationDef {
    SaturationDef {
        model: "constant".into(),
        t_sat: Some(T_SAT),
        p_sat: Some(P_SAT),
        h_evap: Some(2.26e6),
        r: Some(461.5),
        pressure_dependent: false,
    }
}

pub(crate) fn mixture_def(rho1: f64, rho2: f64) -> MixtureDef {
    MixtureDef {
        rho1,
        rho2,
        k1: 0.6,
        k2: 0.025,
        cp1: 4200.0,
        cp2: 2000.0,
        rho_model: MixingRuleDef::Linear,
        k_model: MixingRuleDef::Linear,
        cp_model: MixingRuleDef::Linear,
    }
}

/// Lee with both channels on and spreading off.
pub(crate) fn lee_def(cc: f64, cv: f64) -> PhaseChangeDef {
    PhaseChangeDef {
        model: "Lee".into(),
        condensation: true,
        evaporation: true,
        hardt_wondra: false,
        spread: 3.0,
        cutoff: 1e-3,
        print_phase_change: false,
        spread_weighting: SpreadWeightingDef::default(),
        coeffs: BTreeMap::from([(
            "LeeCoeffs".to_string(),
            BTreeMap::from([("Cc".to_string(), cc), ("Cv".to_string(), cv)]),
        )]),
    }
}

pub(crate) fn properties(phase_change: PhaseChangeDef) -> PhaseChangeProperties {
    PhaseChangeProperties {
        saturation: saturation_def(),
        phase_change,
        mixture: mixture_def(1.0, 1.0),
    }
}

/// State for driving one closure by hand on a 1-D column.
pub(crate) struct Column {
    pub mesh: PolyMesh,
    pub alpha: ScalarField,
    pub p: ScalarField,
    pub t: ScalarField,
    pub cache: InterfaceCache,
    pub saturation: ConstantSaturation,
    pub mixture: ThermalMixture,
}

impl Column {
    /// `alpha`, `p` and `T` per cell on a unit-length line.
    pub fn new(alpha: Vec<f64>, p: Vec<f64>, t: Vec<f64>) -> Self {
        let n = alpha.len();
        let mesh = PolyMesh::line(n, 1.0).unwrap();
        let alpha = ScalarField::new("alpha.liquid", alpha);
        let mut cache = InterfaceCache::new(n);
        cache.update(&mesh, &alpha).unwrap();
        let mut mixture = ThermalMixture::new(&mixture_def(1.0, 1.0), n).unwrap();
        mixture.correct(cache.limited_alpha()).unwrap();
        Self {
            mesh,
            alpha,
            p: ScalarField::new("p", p),
            t: ScalarField::new("T", t),
            cache,
            saturation: ConstantSaturation::new(&saturation_def(), n).unwrap(),
            mixture,
        }
    }

    /// Half liquid, half vapor, uniform `p` and `T`.
    pub fn step(n: usize, p: f64, t: f64) -> Self {
        let alpha = (0..n).map(|c| if c < n / 2 { 1.0 } else { 0.0 }).collect();
        Self::new(alpha, vec![p; n], vec![t; n])
    }

    pub fn with_ctx<R>(
        &self,
        switches: Switches,
        f: impl FnOnce(&ClosureContext<'_>) -> R,
    ) -> R {
        let fields = FlowFields::new(&self.alpha, &self.p, &self.t);
        let ctx = ClosureContext {
            mesh: &self.mesh,
            reduction: &SerialReduction,
            fields: &fields,
            cache: &self.cache,
            saturation: &self.saturation,
            mixture: &self.mixture,
            switches,
        };
        f(&ctx)
    }
}

pub(crate) const BOTH: Switches = Switches {
    condensation: true,
    evaporation: true,
};
