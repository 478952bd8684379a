//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use evalbot_core::DomainError;
use evalbot_database_interface::DatabaseError;
use evalbot_ghapi_interface::ApiError;
use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {source}")]
    IoError { source: std::io::Error },

    #[error("Could not build metrics: {message}")]
    MetricsError { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("Domain error: {source}")]
    DomainError { source: DomainError },

    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },

    #[error("API error: {source}")]
    ApiError { source: ApiError },
}

impl ServerError {
    /// Build a bad request error.
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::BadRequest { message } => message.clone(),
            Self::DatabaseError { source } => database_detail(source),
            Self::ApiError { source } => source.to_string(),
            Self::DomainError { source } => match source {
                DomainError::DatabaseError { source } => database_detail(source),
                DomainError::ApiError { source } => source.to_string(),
                other => other.to_string(),
            },
            _ => "Internal server error".into(),
        }
    }
}

fn database_detail(error: &DatabaseError) -> String {
    match error {
        DatabaseError::UnknownRepository(_) => "Repository not found".into(),
        DatabaseError::UnknownReview(_) => "Review not found".into(),
        _ => "Internal server error".into(),
    }
}

fn database_status(error: &DatabaseError) -> StatusCode {
    match error {
        DatabaseError::UnknownRepository(_) | DatabaseError::UnknownReview(_) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_status(error: &ApiError) -> StatusCode {
    match error {
        ApiError::Upstream { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::DatabaseError { source } => database_status(source),
            Self::ApiError { source } => api_status(source),
            Self::DomainError { source } => match source {
                DomainError::DatabaseError { source } => database_status(source),
                DomainError::ApiError { source } => api_status(source),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, message = "Request failed");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "detail": self.detail()
        }))
    }
}

impl From<DomainError> for ServerError {
    fn from(e: DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

impl From<DatabaseError> for ServerError {
    fn from(e: DatabaseError) -> Self {
        Self::DatabaseError { source: e }
    }
}

impl From<ApiError> for ServerError {
    fn from(e: ApiError) -> Self {
        Self::ApiError { source: e }
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
