pub mod schema;

use schema::ConfigSchemaError;
use thiserror::Error as ThisError;

pub use schema::{DEFAULT_FILENAME, FederationOptions, SharedOverride, Validate};

/// Errors related to options parsing and validation.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    /// Wrapper for data schema-level errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}
