//! pc-core: shared foundation for the phase-change workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for thermodynamic constants)
//! - numeric (Real, small-value guards, indicator and clamping helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{PcError, PcResult};
pub use numeric::*;
pub use units::*;
