//! Auth.

use std::time::Duration;

use evalbot_config::Config;
use http::{header, HeaderMap};
use reqwest::ClientBuilder;

use crate::errors::GitHubError;

const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Get an authenticated GitHub client builder.
pub fn get_authenticated_client_builder(config: &Config) -> Result<ClientBuilder, GitHubError> {
    if config.api.github.token.is_empty() {
        return Err(GitHubError::MissingToken);
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(GITHUB_ACCEPT_HEADER),
    );
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", config.api.github.token))
            .map_err(|e| GitHubError::ImplementationError { source: e.into() })?,
    );

    Ok(get_anonymous_client_builder(config).default_headers(headers))
}

/// Get anonymous GitHub client builder.
pub fn get_anonymous_client_builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new()
        .connect_timeout(Duration::from_millis(config.api.github.connect_timeout))
        .timeout(Duration::from_millis(config.api.github.request_timeout))
        .user_agent(format!("evalbot/{}", config.version))
}

/// Build a GitHub URL.
pub fn build_github_url<T: Into<String>>(config: &Config, path: T) -> String {
    format!(
        "{}{}",
        config.api.github.root_url.trim_end_matches('/'),
        path.into()
    )
}
