//! Saturation temperature correlations.

mod clausius_clapeyron;
mod constant;
mod registry;

pub use clausius_clapeyron::ClausiusClapeyron;
pub use constant::ConstantSaturation;
pub use registry::{SaturationFactory, SaturationRegistry};

use crate::error::{ThermoError, ThermoResult};
use pc_config::SaturationDef;
use pc_core::units::{GasConstant, LatentHeat, Pressure, Temperature, j_per_kg, j_per_kg_k, k, pa};
use pc_mesh::ScalarField;

/// Reference saturation state read from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaturationState {
    /// Global (reference) saturation temperature
    pub t_sat_g: Temperature,
    pub p_sat: Pressure,
    pub h_evap: LatentHeat,
    /// Specific gas constant, when the correlation uses one
    pub r: Option<GasConstant>,
}

impl SaturationState {
    /// Read the reference state; `with_r` makes the gas constant mandatory.
    pub fn from_def(def: &SaturationDef, with_r: bool) -> ThermoResult<Self> {
        let t_sat_g = positive("t_sat", def.require("t_sat")?)?;
        let p_sat = positive("p_sat", def.require("p_sat")?)?;
        let h_evap = positive("h_evap", def.require("h_evap")?)?;
        let r = if with_r {
            Some(j_per_kg_k(positive("r", def.require("r")?)?))
        } else {
            def.r.map(|r| positive("r", r)).transpose()?.map(j_per_kg_k)
        };
        Ok(Self {
            t_sat_g: k(t_sat_g),
            p_sat: pa(p_sat),
            h_evap: j_per_kg(h_evap),
            r,
        })
    }
}

/// Strategy computing the saturation temperature field from pressure.
pub trait SaturationModel: Send + Sync {
    /// Registry key of the correlation.
    fn name(&self) -> &'static str;

    fn state(&self) -> &SaturationState;

    /// Saturation temperature per cell [K].
    fn t_sat(&self) -> &ScalarField;

    /// Update the saturation temperature field from the current pressure.
    fn calc_t_sat(&mut self, p: &ScalarField) -> ThermoResult<()>;

    /// Reload coefficients. Missing required keys are configuration errors.
    fn read(&mut self, def: &SaturationDef) -> ThermoResult<()>;

    fn t_sat_global(&self) -> Temperature {
        self.state().t_sat_g
    }

    fn p_sat(&self) -> Pressure {
        self.state().p_sat
    }

    fn h_evap(&self) -> LatentHeat {
        self.state().h_evap
    }

    fn gas_constant(&self) -> Option<GasConstant> {
        self.state().r
    }
}

fn positive(what: &'static str, value: f64) -> ThermoResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ThermoError::NonPhysical { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> SaturationDef {
        SaturationDef {
            model: "constant".into(),
            t_sat: Some(373.15),
            p_sat: Some(101_325.0),
            h_evap: Some(2.26e6),
            r: None,
            pressure_dependent: false,
        }
    }

    #[test]
    fn state_reads_reference_values() {
        let state = SaturationState::from_def(&def(), false).unwrap();
        assert_eq!(state.t_sat_g.value, 373.15);
        assert_eq!(state.p_sat.value, 101_325.0);
        assert_eq!(state.h_evap.value, 2.26e6);
        assert!(state.r.is_none());
    }

    #[test]
    fn gas_constant_required_on_demand() {
        let err = SaturationState::from_def(&def(), true).unwrap_err();
        assert!(matches!(err, ThermoError::Config(_)));
        assert!(err.to_string().contains("'r'"));
    }

    #[test]
    fn missing_latent_heat_is_config_error() {
        let mut d = def();
        d.h_evap = None;
        assert!(matches!(
            SaturationState::from_def(&d, false),
            Err(ThermoError::Config(_))
        ));
    }

    #[test]
    fn rejects_non_positive_reference() {
        let mut d = def();
        d.t_sat = Some(0.0);
        assert!(matches!(
            SaturationState::from_def(&d, false),
            Err(ThermoError::NonPhysical { what: "t_sat", .. })
        ));
    }
}
