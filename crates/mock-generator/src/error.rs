//! Error types for mock creation and configuration loading.

use mock_core::ConversionError;

/// Error type for top-level mock creation.
///
/// Field-level failures never surface here; they degrade to default values
/// inside the synthesizer.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    /// The root type could not be assembled from synthesized fields
    #[error("Cannot construct mock {type_name}: {source}")]
    Construction {
        type_name: &'static str,
        #[source]
        source: ConversionError,
    },

    /// No type with this name is registered
    #[error("Unknown mock type: {0}")]
    UnknownType(String),

    /// The registered type does not match the requested Rust type
    #[error("Type '{requested}' is registered as {registered}")]
    InvalidType {
        requested: String,
        registered: &'static str,
    },
}

/// Error type for configuration loading and application.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error parsing TOML
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Semantically invalid setting
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Rules configured for a type that is not registered
    #[error("Rules configured for unknown type: {0}")]
    UnknownType(String),
}
