//! API errors.

use thiserror::Error;

/// API error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ApiError {
    /// No token configured.
    #[error("GitHub token not configured on server")]
    MissingToken,

    /// Non-success status returned by GitHub.
    #[error("GitHub API error: {message}")]
    Upstream { status: u16, message: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Result alias for `ApiError`.
pub type Result<T, E = ApiError> = core::result::Result<T, E>;
