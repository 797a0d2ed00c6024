//! Error types for inspector configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::RegistrationError;

/// Error type for configuration operations.
///
/// Covers errors from loading the schema, registering it with the engine
/// and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the schema file.
    #[error("Failed to read schema file '{}': {source}", path.display())]
    FileRead {
        /// Path to the schema file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML schema.
    #[error("Failed to parse TOML schema: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write the schema file (for init command).
    #[error("Failed to write schema file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the schema file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or schema file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A group or flag in the schema could not be registered.
    #[error("Invalid schema: {0}")]
    InvalidSchema(#[from] RegistrationError),
}

/// Well-known field names for `MissingRequired` errors.
pub mod field {
    /// The schema file path.
    pub const SCHEMA: &str = "schema";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
