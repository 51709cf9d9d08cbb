//! pc-thermo: saturation correlations and two-phase thermal property blending.
//!
//! Saturation models are selected by name through [`SaturationRegistry`]; the
//! built-in keys are `constant` and `ClausiusClapeyron`.

pub mod error;
pub mod mixture;
pub mod saturation;

pub use error::{ThermoError, ThermoResult};
pub use mixture::{MixingRule, PhaseProperty, ThermalMixture};
pub use saturation::{
    ClausiusClapeyron, ConstantSaturation, SaturationFactory, SaturationModel,
    SaturationRegistry, SaturationState,
};
