use evalbot_models::{RepositoryPathError, ReviewValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Import/Export JSON error: {message}")]
    ExchangeJsonError { message: String },

    #[error("Unknown repository '{0}'")]
    UnknownRepository(String),

    #[error("Repository '{0}' already exists")]
    RepositoryAlreadyExists(String),

    #[error("Invalid repository: {source}")]
    InvalidRepository { source: RepositoryPathError },

    #[error("Unknown review '{0}'")]
    UnknownReview(String),

    #[error("Invalid review: {source}")]
    InvalidReview { source: ReviewValidationError },

    #[error("Constraint violation on '{constraint}': {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl From<ReviewValidationError> for DatabaseError {
    fn from(source: ReviewValidationError) -> Self {
        Self::InvalidReview { source }
    }
}

impl From<RepositoryPathError> for DatabaseError {
    fn from(source: RepositoryPathError) -> Self {
        Self::InvalidRepository { source }
    }
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
