//! Phase-change model errors.

use pc_config::ConfigError;
use pc_mesh::MeshError;
use pc_thermo::ThermoError;
use thiserror::Error;

pub type PhaseChangeResult<T> = Result<T, PhaseChangeError>;

#[derive(Error, Debug)]
pub enum PhaseChangeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown strategy key; lists the registered alternatives.
    #[error("Unknown {kind} model '{name}' (valid: {})", .valid.join(", "))]
    UnknownModel {
        kind: &'static str,
        name: String,
        valid: Vec<String>,
    },

    #[error("Thermophysical model error: {0}")]
    Thermo(ThermoError),

    /// The spreading solve failed; the flux field is unusable.
    #[error("Numerical divergence: {what}")]
    Divergence { what: String },

    #[error("Mesh error: {0}")]
    Mesh(MeshError),

    #[error("Size mismatch for {what}: expected {expected}, found {found}")]
    SizeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Non-finite value in {what}")]
    NonFinite { what: String },
}

impl From<MeshError> for PhaseChangeError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::ConvergenceFailed { .. } | MeshError::Breakdown { .. } => {
                PhaseChangeError::Divergence {
                    what: err.to_string(),
                }
            }
            MeshError::SizeMismatch {
                what,
                expected,
                found,
            } => PhaseChangeError::SizeMismatch {
                what,
                expected,
                found,
            },
            other => PhaseChangeError::Mesh(other),
        }
    }
}

impl From<ThermoError> for PhaseChangeError {
    fn from(err: ThermoError) -> Self {
        match err {
            ThermoError::Config(e) => PhaseChangeError::Config(e),
            ThermoError::UnknownModel { kind, name, valid } => {
                PhaseChangeError::UnknownModel { kind, name, valid }
            }
            ThermoError::Mesh(e) => e.into(),
            other => PhaseChangeError::Thermo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_failure_is_divergence() {
        let err: PhaseChangeError = MeshError::ConvergenceFailed {
            iterations: 1000,
            residual: 1e-3,
        }
        .into();
        assert!(matches!(err, PhaseChangeError::Divergence { .. }));
        assert!(err.to_string().contains("1000 iterations"));
    }

    #[test]
    fn thermo_selection_error_is_lifted() {
        let err: PhaseChangeError = ThermoError::UnknownModel {
            kind: "saturation",
            name: "x".into(),
            valid: vec!["constant".into()],
        }
        .into();
        assert!(matches!(err, PhaseChangeError::UnknownModel { kind: "saturation", .. }));
    }

    #[test]
    fn size_mismatch_is_kept() {
        let err: PhaseChangeError = MeshError::SizeMismatch {
            what: "T".into(),
            expected: 10,
            found: 9,
        }
        .into();
        assert!(matches!(err, PhaseChangeError::SizeMismatch { expected: 10, .. }));
    }
}
