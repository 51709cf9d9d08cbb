use super::{ClosureContext, PhaseChangeClosure};
use crate::error::PhaseChangeResult;
use crate::fluxes::MassFluxes;
use crate::interface::Region;
use crate::sources::{self, SourcePair};
use pc_config::{CoeffsDict, PhaseChangeDef};
use pc_thermo::ThermalMixture;

/// Pressure-driven transfer confined to interface cells, explicit only.
///
/// The driving force is `(p - pSat) / pSat`: condensation where it is positive
/// (`Cc rho2`), evaporation where it is negative (`Cv rho1`). Cells outside
/// `cutoff < alpha < 1 - cutoff` carry no transfer and the temperature
/// coefficient representation stays zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplicitSharp {
    cc: f64,
    cv: f64,
    mc_coeff: f64,
    mv_coeff: f64,
    cutoff: f64,
}

impl ExplicitSharp {
    pub const NAME: &'static str = "explicitSharp";

    pub fn new(def: &PhaseChangeDef, mixture: &ThermalMixture) -> PhaseChangeResult<Self> {
        let coeffs = def.require_coeffs(Self::NAME)?;
        Self::from_coeffs(&coeffs, def.cutoff, mixture)
    }

    fn from_coeffs(
        coeffs: &CoeffsDict<'_>,
        cutoff: f64,
        mixture: &ThermalMixture,
    ) -> PhaseChangeResult<Self> {
        let cc = coeffs.require("Cc")?;
        let cv = coeffs.require("Cv")?;
        Ok(Self {
            cc,
            cv,
            mc_coeff: cc * mixture.rho2().value,
            mv_coeff: cv * mixture.rho1().value,
            cutoff,
        })
    }

    pub fn cc(&self) -> f64 {
        self.cc
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }
}

impl PhaseChangeClosure for ExplicitSharp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn read(&mut self, def: &PhaseChangeDef, mixture: &ThermalMixture) -> PhaseChangeResult<bool> {
        let Some(coeffs) = def.coeffs_for(Self::NAME) else {
            return Ok(false);
        };
        *self = Self::from_coeffs(&coeffs, def.cutoff, mixture)?;
        Ok(true)
    }

    fn j(&mut self, ctx: &ClosureContext<'_>, fluxes: &mut MassFluxes) -> PhaseChangeResult<()> {
        let p = ctx.fields.p;
        let p_sat = ctx.saturation.p_sat().value;
        let alpha = ctx.cache.limited_alpha();

        for c in 0..p.len() {
            let dp = (p[c] - p_sat) / p_sat;
            let interface = ctx.cache.region(c, self.cutoff) == Region::Interface;
            let cond = if interface && dp > 0.0 {
                self.mc_coeff * dp
            } else {
                0.0
            };
            let evap = if interface && dp < 0.0 {
                self.mv_coeff * dp
            } else {
                0.0
            };

            fluxes.condensation.no_alpha[c] = cond;
            fluxes.condensation.alpha[c] = cond * (1.0 - alpha[c]);
            fluxes.condensation.no_t[c] = 0.0;
            fluxes.evaporation.no_alpha[c] = evap;
            fluxes.evaporation.alpha[c] = evap * alpha[c];
            fluxes.evaporation.no_t[c] = 0.0;
        }
        Ok(())
    }

    fn alpha_source(
        &self,
        ctx: &ClosureContext<'_>,
        fluxes: &MassFluxes,
        out: &mut SourcePair,
    ) -> PhaseChangeResult<()> {
        sources::explicit_alpha_source(fluxes, ctx.rho1(), out);
        Ok(())
    }

    fn t_source(
        &self,
        ctx: &ClosureContext<'_>,
        fluxes: &MassFluxes,
        out: &mut SourcePair,
    ) -> PhaseChangeResult<()> {
        sources::explicit_temperature_source(fluxes, ctx.h_evap(), out);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Cc = {}, Cv = {}, cutoff = {}", self.cc, self.cv, self.cutoff)
    }
}
