use super::{ClosureContext, PhaseChangeClosure, relax_cell};
use crate::error::PhaseChangeResult;
use crate::fluxes::MassFluxes;
use pc_config::{CoeffsDict, PhaseChangeDef};
use pc_thermo::ThermalMixture;

/// Lee relaxation model: `m = -C rho (T - TSat) / TSat`.
///
/// Condensation uses `mcCoeff = Cc rho2`, evaporation `mvCoeff = Cv rho1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Lee {
    cc: f64,
    cv: f64,
    mc_coeff: f64,
    mv_coeff: f64,
}

impl Lee {
    pub const NAME: &'static str = "Lee";

    pub fn new(def: &PhaseChangeDef, mixture: &ThermalMixture) -> PhaseChangeResult<Self> {
        Self::from_section(Self::NAME, def, mixture)
    }

    /// Build from the `<section>Coeffs` subsection, which must be present.
    pub(crate) fn from_section(
        section: &str,
        def: &PhaseChangeDef,
        mixture: &ThermalMixture,
    ) -> PhaseChangeResult<Self> {
        let coeffs = def.require_coeffs(section)?;
        Self::from_coeffs(&coeffs, mixture)
    }

    pub(crate) fn from_coeffs(
        coeffs: &CoeffsDict<'_>,
        mixture: &ThermalMixture,
    ) -> PhaseChangeResult<Self> {
        let cc = coeffs.require("Cc")?;
        let cv = coeffs.require("Cv")?;
        Ok(Self {
            cc,
            cv,
            mc_coeff: cc * mixture.rho2().value,
            mv_coeff: cv * mixture.rho1().value,
        })
    }

    pub fn cc(&self) -> f64 {
        self.cc
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }

    pub fn mc_coeff(&self) -> f64 {
        self.mc_coeff
    }

    pub fn mv_coeff(&self) -> f64 {
        self.mv_coeff
    }

    pub(crate) fn set_coeffs(&mut self, mc_coeff: f64, mv_coeff: f64) {
        self.mc_coeff = mc_coeff;
        self.mv_coeff = mv_coeff;
    }

    pub(crate) fn relax(&self, ctx: &ClosureContext<'_>, fluxes: &mut MassFluxes) {
        let t = ctx.fields.t;
        let t_sat = ctx.saturation.t_sat();
        let alpha = ctx.cache.limited_alpha();
        for c in 0..t.len() {
            relax_cell(
                fluxes,
                c,
                t[c] - t_sat[c],
                t_sat[c],
                alpha[c],
                self.mc_coeff,
                self.mv_coeff,
            );
        }
    }
}

impl PhaseChangeClosure for Lee {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn read(&mut self, def: &PhaseChangeDef, mixture: &ThermalMixture) -> PhaseChangeResult<bool> {
        let Some(coeffs) = def.coeffs_for(Self::NAME) else {
            return Ok(false);
        };
        *self = Self::from_coeffs(&coeffs, mixture)?;
        Ok(true)
    }

    fn j(&mut self, ctx: &ClosureContext<'_>, fluxes: &mut MassFluxes) -> PhaseChangeResult<()> {
        self.relax(ctx, fluxes);
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "Cc = {}, Cv = {}, mcCoeff = {}, mvCoeff = {}",
            self.cc, self.cv, self.mc_coeff, self.mv_coeff
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BOTH, Column, T_SAT, lee_def, mixture_def};

    #[test]
    fn coefficients_take_phase_densities() {
        let mixture = ThermalMixture::new(&mixture_def(958.4, 0.597), 1).unwrap();
        let lee = Lee::new(&lee_def(0.1, 0.2), &mixture).unwrap();
        assert_eq!(lee.cc(), 0.1);
        assert_eq!(lee.cv(), 0.2);
        assert!((lee.mc_coeff() - 0.1 * 0.597).abs() < 1e-15);
        assert!((lee.mv_coeff() - 0.2 * 958.4).abs() < 1e-12);
    }

    #[test]
    fn missing_key_is_fatal_and_missing_section_is_not() {
        let mixture = ThermalMixture::new(&mixture_def(1.0, 1.0), 1).unwrap();
        let mut def = lee_def(0.1, 0.2);
        let mut lee = Lee::new(&def, &mixture).unwrap();

        def.coeffs.get_mut("LeeCoeffs").unwrap().remove("Cv");
        assert!(lee.read(&def, &mixture).is_err());

        def.coeffs.clear();
        assert!(!lee.read(&def, &mixture).unwrap());
        assert!(Lee::new(&def, &mixture).is_err());
    }

    #[test]
    fn representations_agree() {
        let col = Column::new(
            vec![1.0, 0.7, 0.3, 0.0],
            vec![1e5; 4],
            vec![T_SAT + 2.0, T_SAT + 1.0, T_SAT - 1.0, T_SAT - 2.0],
        );
        let mut lee = Lee::new(&lee_def(3.0, 5.0), &col.mixture).unwrap();
        let mut fluxes = MassFluxes::new(4);
        col.with_ctx(BOTH, |ctx| lee.j(ctx, &mut fluxes)).unwrap();

        let alpha = col.cache.limited_alpha();
        for c in 0..4 {
            let dt = col.t[c] - T_SAT;
            let cond = &fluxes.condensation;
            let evap = &fluxes.evaporation;
            assert!((cond.alpha[c] - cond.no_alpha[c] * (1.0 - alpha[c])).abs() < 1e-15);
            assert!((evap.alpha[c] - evap.no_alpha[c] * alpha[c]).abs() < 1e-15);
            assert!((cond.no_t[c] * dt - cond.alpha[c]).abs() < 1e-15);
            assert!((evap.no_t[c] * dt + evap.alpha[c]).abs() < 1e-15);
        }
        assert!(fluxes.evaporation.no_alpha[0] < 0.0);
        assert!(fluxes.condensation.no_alpha[3] > 0.0);
    }
}
