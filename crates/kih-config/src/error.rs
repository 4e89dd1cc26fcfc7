//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the requested command has no usable values.
    #[error(
        "Configuration section '{section}' is not configured (set it in .kih/config.toml or KIH_{upper}__* variables)",
        upper = .section.to_uppercase()
    )]
    NotConfigured { section: String },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
