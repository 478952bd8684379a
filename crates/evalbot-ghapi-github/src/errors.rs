use evalbot_ghapi_interface::ApiError;

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum GitHubError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error("GitHub token not configured on server")]
    MissingToken,

    #[error("GitHub API error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::HttpError { source: e }
    }
}

impl From<GitHubError> for ApiError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::MissingToken => ApiError::MissingToken,
            GitHubError::UpstreamError { status, message } => {
                ApiError::Upstream { status, message }
            }
            e => ApiError::ImplementationError { source: e.into() },
        }
    }
}
