//! Error types for mesh, field and linear-solver operations.

use pc_core::PcError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Invalid mesh: {what}")]
    InvalidMesh { what: String },

    #[error("Size mismatch for {what}: expected {expected}, found {found}")]
    SizeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Linear solve did not converge after {iterations} iterations (residual {residual:e})")]
    ConvergenceFailed { iterations: usize, residual: f64 },

    #[error("Linear solver breakdown: {what}")]
    Breakdown { what: String },

    #[error("Core error: {0}")]
    Core(#[from] PcError),
}

pub type MeshResult<T> = Result<T, MeshError>;

impl MeshError {
    pub fn check_len(what: &str, expected: usize, found: usize) -> MeshResult<()> {
        if expected == found {
            Ok(())
        } else {
            Err(MeshError::SizeMismatch {
                what: what.to_string(),
                expected,
                found,
            })
        }
    }
}
