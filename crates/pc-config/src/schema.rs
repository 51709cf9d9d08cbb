//! Schema of the `phaseChangeProperties` document.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseChangeProperties {
    pub saturation: SaturationDef,
    pub phase_change: PhaseChangeDef,
    pub mixture: MixtureDef,
}

/// Saturation correlation selection and its reference state.
///
/// Numeric entries are optional at the serde level so that each saturation
/// model can decide which ones it requires when it reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaturationDef {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_sat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_sat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_evap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default)]
    pub pressure_dependent: bool,
}

impl SaturationDef {
    pub const SECTION: &'static str = "saturation";

    pub fn require(&self, key: &str) -> ConfigResult<f64> {
        let value = match key {
            "t_sat" => self.t_sat,
            "p_sat" => self.p_sat,
            "h_evap" => self.h_evap,
            "r" => self.r,
            _ => None,
        };
        value.ok_or_else(|| ConfigError::MissingKey {
            section: Self::SECTION.to_string(),
            key: key.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseChangeDef {
    pub model: String,
    pub condensation: bool,
    pub evaporation: bool,
    #[serde(default = "default_true")]
    pub hardt_wondra: bool,
    #[serde(default = "default_spread")]
    pub spread: f64,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default)]
    pub print_phase_change: bool,
    #[serde(default)]
    pub spread_weighting: SpreadWeightingDef,
    /// Per-model coefficient subsections, keyed `<Model>Coeffs`.
    #[serde(default)]
    pub coeffs: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PhaseChangeDef {
    pub const SECTION: &'static str = "phase_change";

    /// Coefficient subsection for `model`, if present.
    pub fn coeffs_for(&self, model: &str) -> Option<CoeffsDict<'_>> {
        let section = format!("{model}Coeffs");
        self.coeffs
            .get(&section)
            .map(|values| CoeffsDict { section, values })
    }

    /// Coefficient subsection for `model`; absent is a configuration error.
    pub fn require_coeffs(&self, model: &str) -> ConfigResult<CoeffsDict<'_>> {
        self.coeffs_for(model)
            .ok_or_else(|| ConfigError::MissingSection {
                section: format!("{}.coeffs.{model}Coeffs", Self::SECTION),
            })
    }
}

/// Borrowed view of one `<Model>Coeffs` subsection.
#[derive(Debug, Clone)]
pub struct CoeffsDict<'a> {
    section: String,
    values: &'a BTreeMap<String, f64>,
}

impl CoeffsDict<'_> {
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn require(&self, key: &str) -> ConfigResult<f64> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| ConfigError::MissingKey {
                section: self.section.clone(),
                key: key.to_string(),
            })
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn get_or(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).copied().unwrap_or(default)
    }
}

/// Which representations the spreader rescales by the first normalization.
///
/// Defaults are the canonical weighting; the flags enable the alternative
/// weightings the algorithm description mentions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SpreadWeightingDef {
    #[serde(default)]
    pub scale_condensation_no_alpha: bool,
    #[serde(default)]
    pub scale_evaporation_alpha: bool,
}

/// Two-phase thermal properties. Phase 1 is the liquid, phase 2 the vapor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixtureDef {
    pub rho1: f64,
    pub rho2: f64,
    pub k1: f64,
    pub k2: f64,
    pub cp1: f64,
    pub cp2: f64,
    #[serde(default)]
    pub rho_model: MixingRuleDef,
    #[serde(default)]
    pub k_model: MixingRuleDef,
    #[serde(default)]
    pub cp_model: MixingRuleDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MixingRuleDef {
    #[default]
    Linear,
    Step,
}

fn default_true() -> bool {
    true
}

fn default_spread() -> f64 {
    3.0
}

fn default_cutoff() -> f64 {
    1e-3
}
