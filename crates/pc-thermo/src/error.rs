use pc_config::ConfigError;
use pc_mesh::MeshError;
use thiserror::Error;

pub type ThermoResult<T> = Result<T, ThermoError>;

#[derive(Error, Debug)]
pub enum ThermoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown strategy key; lists the registered alternatives.
    #[error("Unknown {kind} model '{name}' (valid: {})", .valid.join(", "))]
    UnknownModel {
        kind: &'static str,
        name: String,
        valid: Vec<String>,
    },

    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}
