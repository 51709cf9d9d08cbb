//! pc-config: the `phaseChangeProperties` document, its loading and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::validate_properties;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Missing key '{key}' in {section}")]
    MissingKey { section: String, key: String },

    #[error("Missing section {section}")]
    MissingSection { section: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ConfigResult<PhaseChangeProperties> {
    let props: PhaseChangeProperties = serde_yaml::from_str(content)?;
    validate_properties(&props)?;
    Ok(props)
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<PhaseChangeProperties> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, props: &PhaseChangeProperties) -> ConfigResult<()> {
    validate_properties(props)?;
    let content = serde_yaml::to_string(props)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<PhaseChangeProperties> {
    let content = std::fs::read_to_string(path)?;
    let props: PhaseChangeProperties = serde_json::from_str(&content)?;
    validate_properties(&props)?;
    Ok(props)
}

pub fn save_json(path: &std::path::Path, props: &PhaseChangeProperties) -> ConfigResult<()> {
    validate_properties(props)?;
    let content = serde_json::to_string_pretty(props)?;
    std::fs::write(path, content)?;
    Ok(())
}
