//! Thermal property blending for the liquid/vapor mixture.
//!
//! Phase 1 is the liquid, phase 2 the vapor. Each property carries its own
//! mixing rule and is evaluated on the limited liquid fraction.

use crate::error::{ThermoError, ThermoResult};
use pc_config::{MixingRuleDef, MixtureDef};
use pc_core::units::{Conductivity, Density, HeatCapacity, j_per_kg_k, kg_per_m3, w_per_m_k};
use pc_mesh::ScalarField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixingRule {
    /// `alpha p1 + (1 - alpha) p2`
    Linear,
    /// `p1` where `alpha >= 0.5`, else `p2`
    Step,
}

impl From<MixingRuleDef> for MixingRule {
    fn from(def: MixingRuleDef) -> Self {
        match def {
            MixingRuleDef::Linear => MixingRule::Linear,
            MixingRuleDef::Step => MixingRule::Step,
        }
    }
}

impl MixingRule {
    #[inline]
    pub fn blend(self, alpha: f64, liquid: f64, vapor: f64) -> f64 {
        match self {
            MixingRule::Linear => alpha * liquid + (1.0 - alpha) * vapor,
            MixingRule::Step => {
                if alpha >= 0.5 {
                    liquid
                } else {
                    vapor
                }
            }
        }
    }
}

/// Per-phase values of one property plus its mixing rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseProperty {
    pub liquid: f64,
    pub vapor: f64,
    pub rule: MixingRule,
}

impl PhaseProperty {
    fn new(what: &'static str, liquid: f64, vapor: f64, rule: MixingRuleDef) -> ThermoResult<Self> {
        for value in [liquid, vapor] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ThermoError::NonPhysical { what, value });
            }
        }
        Ok(Self {
            liquid,
            vapor,
            rule: rule.into(),
        })
    }

    fn evaluate(&self, limited_alpha: &ScalarField, out: &mut ScalarField) {
        for (o, &a) in out.values_mut().iter_mut().zip(limited_alpha.iter()) {
            *o = self.rule.blend(a, self.liquid, self.vapor);
        }
    }
}

/// Mixture density, conductivity and heat capacity.
#[derive(Clone, Debug)]
pub struct ThermalMixture {
    rho: PhaseProperty,
    k: PhaseProperty,
    cp: PhaseProperty,
    rho_field: ScalarField,
    k_field: ScalarField,
    cp_field: ScalarField,
}

impl ThermalMixture {
    pub fn new(def: &MixtureDef, n_cells: usize) -> ThermoResult<Self> {
        let mut mixture = Self {
            rho: PhaseProperty::new("rho", 1.0, 1.0, MixingRuleDef::Linear)?,
            k: PhaseProperty::new("k", 1.0, 1.0, MixingRuleDef::Linear)?,
            cp: PhaseProperty::new("cp", 1.0, 1.0, MixingRuleDef::Linear)?,
            rho_field: ScalarField::zeros("rho", n_cells),
            k_field: ScalarField::zeros("k", n_cells),
            cp_field: ScalarField::zeros("cp", n_cells),
        };
        mixture.read(def)?;
        Ok(mixture)
    }

    pub fn read(&mut self, def: &MixtureDef) -> ThermoResult<()> {
        self.rho = PhaseProperty::new("rho", def.rho1, def.rho2, def.rho_model)?;
        self.k = PhaseProperty::new("k", def.k1, def.k2, def.k_model)?;
        self.cp = PhaseProperty::new("cp", def.cp1, def.cp2, def.cp_model)?;
        Ok(())
    }

    /// Re-evaluate the mixture fields from the limited liquid fraction.
    pub fn correct(&mut self, limited_alpha: &ScalarField) -> ThermoResult<()> {
        limited_alpha.check_len(self.rho_field.len())?;
        self.rho.evaluate(limited_alpha, &mut self.rho_field);
        self.k.evaluate(limited_alpha, &mut self.k_field);
        self.cp.evaluate(limited_alpha, &mut self.cp_field);
        Ok(())
    }

    pub fn rho1(&self) -> Density {
        kg_per_m3(self.rho.liquid)
    }

    pub fn rho2(&self) -> Density {
        kg_per_m3(self.rho.vapor)
    }

    pub fn k1(&self) -> Conductivity {
        w_per_m_k(self.k.liquid)
    }

    pub fn k2(&self) -> Conductivity {
        w_per_m_k(self.k.vapor)
    }

    pub fn cp1(&self) -> HeatCapacity {
        j_per_kg_k(self.cp.liquid)
    }

    pub fn cp2(&self) -> HeatCapacity {
        j_per_kg_k(self.cp.vapor)
    }

    pub fn rho(&self) -> &ScalarField {
        &self.rho_field
    }

    pub fn k(&self) -> &ScalarField {
        &self.k_field
    }

    pub fn cp(&self) -> &ScalarField {
        &self.cp_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> MixtureDef {
        MixtureDef {
            rho1: 1000.0,
            rho2: 1.0,
            k1: 0.6,
            k2: 0.02,
            cp1: 4200.0,
            cp2: 2000.0,
            rho_model: MixingRuleDef::Linear,
            k_model: MixingRuleDef::Linear,
            cp_model: MixingRuleDef::Step,
        }
    }

    #[test]
    fn blends_per_rule() {
        let mut mix = ThermalMixture::new(&def(), 3).unwrap();
        let alpha = ScalarField::new("alpha1", vec![0.0, 0.25, 1.0]);
        mix.correct(&alpha).unwrap();

        assert_eq!(mix.rho().values(), &[1.0, 250.75, 1000.0]);
        assert!((mix.k()[1] - 0.165).abs() < 1e-12);
        assert_eq!(mix.cp().values(), &[2000.0, 2000.0, 4200.0]);
    }

    #[test]
    fn step_switches_at_half() {
        assert_eq!(MixingRule::Step.blend(0.5, 2.0, 1.0), 2.0);
        assert_eq!(MixingRule::Step.blend(0.4999, 2.0, 1.0), 1.0);
    }

    #[test]
    fn phase_values_in_si() {
        let mix = ThermalMixture::new(&def(), 1).unwrap();
        assert_eq!(mix.rho1().value, 1000.0);
        assert_eq!(mix.rho2().value, 1.0);
        assert_eq!(mix.k2().value, 0.02);
        assert_eq!(mix.cp1().value, 4200.0);
    }

    #[test]
    fn rejects_non_positive_density() {
        let mut d = def();
        d.rho2 = -1.0;
        assert!(matches!(
            ThermalMixture::new(&d, 1),
            Err(ThermoError::NonPhysical { what: "rho", .. })
        ));
    }

    #[test]
    fn correct_checks_size() {
        let mut mix = ThermalMixture::new(&def(), 2).unwrap();
        assert!(matches!(
            mix.correct(&ScalarField::zeros("alpha1", 3)),
            Err(ThermoError::Mesh(_))
        ));
    }
}
