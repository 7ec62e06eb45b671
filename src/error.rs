//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by user lookup, mutation, and provider assembly.
///
/// Cache failures never appear here: the cache layer is fail-open and its
/// errors stay inside [`crate::infrastructure::cache`].
#[derive(Debug, Error)]
pub enum AppError {
    /// The authoritative store rejected or failed the operation.
    #[error("data access error: {0}")]
    DataAccess(#[from] sqlx::Error),

    /// A mutation targeted a user id that does not exist.
    #[error("user {id} not found")]
    NotFound { id: i64 },

    /// Provider or repository assembly was given an invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No provider factory is registered under the requested driver name.
    #[error("unknown provider driver '{0}'")]
    UnknownDriver(String),
}

impl AppError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
