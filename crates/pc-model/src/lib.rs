//! pc-model: phase-change source terms for two-phase flow.
//!
//! [`PhaseChangeModel`] turns the current volume fraction, pressure and
//! temperature into implicit/explicit source pairs for the volume-fraction,
//! pressure and temperature equations. The transfer law is a
//! [`PhaseChangeClosure`] selected by name from a [`PhaseChangeRegistry`]
//! (`Lee`, `ChoiZhang`, `Xu`, `Tanasawa`, `explicitSharp`); sharp sources can
//! be smoothed by the [`HardtWondra`] spreader.

pub mod closure;
pub mod error;
pub mod fields;
pub mod fluxes;
pub mod interface;
pub mod model;
pub mod registry;
pub mod sources;
pub mod spreader;

#[cfg(test)]
mod test_support;

pub use closure::{
    ChoiZhang, ClosureContext, ExplicitSharp, Lee, PhaseChangeClosure, Tanasawa, TransferTotals, Xu,
};
pub use error::{PhaseChangeError, PhaseChangeResult};
pub use fields::FlowFields;
pub use fluxes::{Channel, ChannelFluxes, InterfaceFluxes, MassFluxes, Switches};
pub use interface::{InterfaceCache, Region};
pub use model::{PhaseChangeModel, TransferIntegrals};
pub use registry::{ClosureFactory, PhaseChangeRegistry};
pub use sources::{SourcePair, SourceTerms};
pub use spreader::{
    ChannelSpread, DEGENERATE_NORMALIZATION, HardtWondra, SpreadReport, SpreadWeighting,
};
