//! Error types for furnish

use thiserror::Error;

/// The main error type for furnish operations
#[derive(Debug, Error)]
pub enum FurnishError {
    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("Unknown furniture type: {0}")]
    UnknownFurnitureType(u32),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Plan parse error: {0}")]
    PlanParse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for furnish operations
pub type Result<T> = std::result::Result<T, FurnishError>;

impl From<toml::de::Error> for FurnishError {
    fn from(err: toml::de::Error) -> Self {
        FurnishError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for FurnishError {
    fn from(err: toml::ser::Error) -> Self {
        FurnishError::TomlSerError(err.to_string())
    }
}

impl From<serde_json::Error> for FurnishError {
    fn from(err: serde_json::Error) -> Self {
        FurnishError::JsonError(err.to_string())
    }
}
