//! Validation of a deserialized properties document.
//!
//! Only checks that hold for every model selection live here. Keys that a
//! particular saturation or phase-change model requires are checked by that
//! model when it reads its configuration.

use crate::ConfigError;
use crate::schema::{MixtureDef, PhaseChangeDef, PhaseChangeProperties, SaturationDef};

pub fn validate_properties(props: &PhaseChangeProperties) -> Result<(), ConfigError> {
    validate_saturation(&props.saturation)?;
    validate_phase_change(&props.phase_change)?;
    validate_mixture(&props.mixture)?;
    Ok(())
}

fn validate_saturation(sat: &SaturationDef) -> Result<(), ConfigError> {
    if sat.model.trim().is_empty() {
        return Err(invalid("saturation.model", &sat.model, "must not be empty"));
    }
    for (field, value) in [
        ("saturation.t_sat", sat.t_sat),
        ("saturation.p_sat", sat.p_sat),
        ("saturation.h_evap", sat.h_evap),
        ("saturation.r", sat.r),
    ] {
        if let Some(v) = value {
            positive(field, v)?;
        }
    }
    Ok(())
}

fn validate_phase_change(pc: &PhaseChangeDef) -> Result<(), ConfigError> {
    if pc.model.trim().is_empty() {
        return Err(invalid("phase_change.model", &pc.model, "must not be empty"));
    }
    positive("phase_change.spread", pc.spread)?;
    if !pc.cutoff.is_finite() || pc.cutoff <= 0.0 || pc.cutoff >= 0.5 {
        return Err(invalid(
            "phase_change.cutoff",
            &pc.cutoff.to_string(),
            "must lie in (0, 0.5)",
        ));
    }
    for (section, values) in &pc.coeffs {
        if !section.ends_with("Coeffs") {
            return Err(invalid(
                "phase_change.coeffs",
                section,
                "subsection names must end with 'Coeffs'",
            ));
        }
        for (key, value) in values {
            if !value.is_finite() {
                return Err(invalid(
                    &format!("phase_change.coeffs.{section}.{key}"),
                    &value.to_string(),
                    "must be finite",
                ));
            }
        }
    }
    Ok(())
}

fn validate_mixture(mix: &MixtureDef) -> Result<(), ConfigError> {
    positive("mixture.rho1", mix.rho1)?;
    positive("mixture.rho2", mix.rho2)?;
    positive("mixture.k1", mix.k1)?;
    positive("mixture.k2", mix.k2)?;
    positive("mixture.cp1", mix.cp1)?;
    positive("mixture.cp2", mix.cp2)?;
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be positive and finite"))
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MixingRuleDef, SpreadWeightingDef};
    use std::collections::BTreeMap;

    fn props() -> PhaseChangeProperties {
        PhaseChangeProperties {
            saturation: SaturationDef {
                model: "constant".into(),
                t_sat: Some(373.15),
                p_sat: Some(101_325.0),
                h_evap: Some(2.26e6),
                r: None,
                pressure_dependent: false,
            },
            phase_change: PhaseChangeDef {
                model: "Lee".into(),
                condensation: true,
                evaporation: true,
                hardt_wondra: true,
                spread: 3.0,
                cutoff: 1e-3,
                print_phase_change: false,
                spread_weighting: SpreadWeightingDef::default(),
                coeffs: BTreeMap::new(),
            },
            mixture: MixtureDef {
                rho1: 958.4,
                rho2: 0.597,
                k1: 0.679,
                k2: 0.025,
                cp1: 4216.0,
                cp2: 2030.0,
                rho_model: MixingRuleDef::Linear,
                k_model: MixingRuleDef::Linear,
                cp_model: MixingRuleDef::Step,
            },
        }
    }

    #[test]
    fn valid_document_passes() {
        validate_properties(&props()).unwrap();
    }

    #[test]
    fn rejects_bad_cutoff() {
        let mut p = props();
        p.phase_change.cutoff = 0.5;
        let err = validate_properties(&p).unwrap_err();
        assert!(err.to_string().contains("cutoff"));
    }

    #[test]
    fn rejects_non_positive_density() {
        let mut p = props();
        p.mixture.rho2 = 0.0;
        let err = validate_properties(&p).unwrap_err();
        assert!(err.to_string().contains("rho2"));
    }

    #[test]
    fn rejects_negative_latent_heat() {
        let mut p = props();
        p.saturation.h_evap = Some(-1.0);
        assert!(validate_properties(&p).is_err());
    }

    #[test]
    fn rejects_misnamed_coeff_section() {
        let mut p = props();
        p.phase_change
            .coeffs
            .insert("Lee".into(), BTreeMap::from([("Cc".to_string(), 1.0)]));
        let err = validate_properties(&p).unwrap_err();
        assert!(err.to_string().contains("Coeffs"));
    }
}
