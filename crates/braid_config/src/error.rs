//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `braid.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A referenced bundle name does not exist in the configuration.
    #[error("unknown bundle '{0}'")]
    UnknownBundle(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// No output directory is configured for a bundle's extension.
    #[error("no [output] directory configured for extension '{0}'")]
    MissingOutput(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
