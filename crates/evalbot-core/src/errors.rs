//! Logic errors.

use thiserror::Error;

/// Logic error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    /// Wraps [`regex::Error`].
    #[error("Error while compiling regex: {source}")]
    RegexError { source: regex::Error },

    /// Wraps [`evalbot_ghapi_interface::ApiError`].
    #[error("API error: {source}")]
    ApiError {
        source: evalbot_ghapi_interface::ApiError,
    },

    /// Wraps [`evalbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError {
        source: evalbot_database_interface::DatabaseError,
    },

    /// Lookback window reaching before the representable time range.
    #[error("Invalid lookback window: {days} days")]
    InvalidLookback { days: u32 },

    /// Wraps [`evalbot_models::RepositoryPathError`].
    #[error(transparent)]
    RepositoryPathError {
        source: evalbot_models::RepositoryPathError,
    },
}

impl From<regex::Error> for DomainError {
    fn from(e: regex::Error) -> Self {
        Self::RegexError { source: e }
    }
}

impl From<evalbot_ghapi_interface::ApiError> for DomainError {
    fn from(e: evalbot_ghapi_interface::ApiError) -> Self {
        Self::ApiError { source: e }
    }
}

impl From<evalbot_database_interface::DatabaseError> for DomainError {
    fn from(e: evalbot_database_interface::DatabaseError) -> Self {
        Self::DatabaseError { source: e }
    }
}

impl From<evalbot_models::RepositoryPathError> for DomainError {
    fn from(e: evalbot_models::RepositoryPathError) -> Self {
        Self::RepositoryPathError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
