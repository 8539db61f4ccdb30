use crate::config::ConfigError;
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error wrapper. Scope synthesis and remote classification are
/// total, so the only failing surface is options loading.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
}
