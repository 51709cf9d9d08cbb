//! Physical closures relating the thermodynamic driving force to mass transfer.

mod choi_zhang;
mod explicit_sharp;
mod lee;
mod tanasawa;

pub use choi_zhang::{ChoiZhang, TransferTotals, Xu};
pub use explicit_sharp::ExplicitSharp;
pub use lee::Lee;
pub use tanasawa::Tanasawa;

use crate::error::PhaseChangeResult;
use crate::fields::FlowFields;
use crate::fluxes::{InterfaceFluxes, MassFluxes, Switches};
use crate::interface::InterfaceCache;
use crate::sources::{self, SourcePair};
use pc_config::PhaseChangeDef;
use pc_core::{SMALL, neg, pos0};
use pc_mesh::{FvMesh, Reduction};
use pc_thermo::{SaturationModel, ThermalMixture};

/// Everything a closure may read during one correction.
pub struct ClosureContext<'a> {
    pub mesh: &'a dyn FvMesh,
    pub reduction: &'a dyn Reduction,
    pub fields: &'a FlowFields<'a>,
    pub cache: &'a InterfaceCache,
    pub saturation: &'a dyn SaturationModel,
    pub mixture: &'a ThermalMixture,
    pub switches: Switches,
}

impl ClosureContext<'_> {
    pub fn rho1(&self) -> f64 {
        self.mixture.rho1().value
    }

    pub fn rho2(&self) -> f64 {
        self.mixture.rho2().value
    }

    pub fn h_evap(&self) -> f64 {
        self.saturation.h_evap().value
    }
}

/// Strategy computing the raw mass fluxes of one phase-change model.
///
/// The owning model zeroes switched-off channels after [`j`](Self::j), so
/// closures may fill both channels unconditionally.
pub trait PhaseChangeClosure: Send + Sync {
    /// Registry key; also the prefix of the `<Name>Coeffs` subsection.
    fn name(&self) -> &'static str;

    /// Re-read coefficients. `Ok(false)` when the subsection is absent.
    fn read(&mut self, def: &PhaseChangeDef, mixture: &ThermalMixture) -> PhaseChangeResult<bool>;

    /// Fill every representation of both channels from the current state.
    fn j(&mut self, ctx: &ClosureContext<'_>, fluxes: &mut MassFluxes) -> PhaseChangeResult<()>;

    /// Record whatever the closure needs from the raw fluxes just computed.
    ///
    /// Called on every correction before spreading. Must leave the
    /// coefficients used by [`j`](Self::j) untouched.
    fn observe(
        &mut self,
        _ctx: &ClosureContext<'_>,
        _fluxes: &MassFluxes,
    ) -> PhaseChangeResult<()> {
        Ok(())
    }

    /// Advance adaptive coefficients once per time step from the last
    /// observed correction.
    fn adapt(&mut self, _mixture: &ThermalMixture, _switches: Switches) {}

    /// Interfacial fluxes as volumetric rate over `|grad alpha|`.
    fn interface_fluxes(
        &self,
        ctx: &ClosureContext<'_>,
        fluxes: &MassFluxes,
        out: &mut InterfaceFluxes,
    ) -> PhaseChangeResult<()> {
        let mag = ctx.cache.mag_grad_alpha();
        for c in 0..mag.len() {
            if mag[c] > SMALL {
                out.jc[c] = fluxes.condensation.no_alpha[c] / mag[c];
                out.je[c] = -fluxes.evaporation.no_alpha[c] / mag[c];
            } else {
                out.jc[c] = 0.0;
                out.je[c] = 0.0;
            }
        }
        Ok(())
    }

    fn alpha_source(
        &self,
        ctx: &ClosureContext<'_>,
        fluxes: &MassFluxes,
        out: &mut SourcePair,
    ) -> PhaseChangeResult<()> {
        sources::implicit_alpha_source(fluxes, ctx.rho1(), out);
        Ok(())
    }

    fn p_source(
        &self,
        ctx: &ClosureContext<'_>,
        fluxes: &MassFluxes,
        out: &mut SourcePair,
    ) -> PhaseChangeResult<()> {
        sources::dilatation_source(fluxes, ctx.rho1(), ctx.rho2(), out);
        Ok(())
    }

    fn t_source(
        &self,
        ctx: &ClosureContext<'_>,
        fluxes: &MassFluxes,
        out: &mut SourcePair,
    ) -> PhaseChangeResult<()> {
        sources::implicit_temperature_source(fluxes, ctx.h_evap(), ctx.saturation.t_sat(), out);
        Ok(())
    }

    /// Human-readable coefficient summary for logs.
    fn describe(&self) -> String {
        String::new()
    }
}

/// Relaxation law shared by the temperature-driven closures.
///
/// `mc` and `mv` are the per-cell condensation and evaporation coefficients
/// multiplying `(T - TSat) / TSat`.
#[inline]
pub(crate) fn relax_cell(
    fluxes: &mut MassFluxes,
    cell: usize,
    dt: f64,
    t_sat: f64,
    alpha: f64,
    mc: f64,
    mv: f64,
) {
    let cond = &mut fluxes.condensation;
    let cond_rate = -mc * neg(dt) / t_sat;
    cond.no_alpha[cell] = cond_rate * dt;
    cond.alpha[cell] = cond_rate * dt * (1.0 - alpha);
    cond.no_t[cell] = cond_rate * (1.0 - alpha);

    let evap = &mut fluxes.evaporation;
    let evap_rate = -mv * pos0(dt) / t_sat;
    evap.no_alpha[cell] = evap_rate * dt;
    evap.alpha[cell] = evap_rate * dt * alpha;
    evap.no_t[cell] = -evap_rate * alpha;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxation_signs() {
        let mut f = MassFluxes::new(2);
        relax_cell(&mut f, 0, -2.0, 400.0, 0.25, 10.0, 20.0);
        relax_cell(&mut f, 1, 2.0, 400.0, 0.25, 10.0, 20.0);

        // subcooled: condensation only
        assert!((f.condensation.no_alpha[0] - 10.0 * 2.0 / 400.0).abs() < 1e-15);
        assert!((f.condensation.alpha[0] - 10.0 * 2.0 / 400.0 * 0.75).abs() < 1e-15);
        assert!(f.condensation.no_t[0] < 0.0);
        assert_eq!(f.evaporation.no_alpha[0], 0.0);

        // superheated: evaporation only
        assert!((f.evaporation.no_alpha[1] + 20.0 * 2.0 / 400.0).abs() < 1e-15);
        assert!((f.evaporation.alpha[1] + 20.0 * 2.0 / 400.0 * 0.25).abs() < 1e-15);
        assert!(f.evaporation.no_t[1] > 0.0);
        assert_eq!(f.condensation.no_alpha[1], 0.0);

        // no_t times (T - TSat) gives the weighted rate with the energy sign
        assert!((f.condensation.no_t[0] * -2.0 - f.condensation.alpha[0]).abs() < 1e-15);
        assert!((-f.evaporation.no_t[1] * 2.0 - f.evaporation.alpha[1]).abs() < 1e-15);
    }
}
