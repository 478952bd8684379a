use async_trait::async_trait;
use evalbot_config::Config;
use evalbot_ghapi_interface::{
    types::{GhPullRequest, GhReviewComment},
    ApiError, ApiService, Result, REVIEW_COMMENTS_PER_PAGE,
};
use reqwest::{Client, Response};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{
    auth::{build_github_url, get_authenticated_client_builder},
    errors::GitHubError,
};

/// GitHub API service implementation.
#[derive(Clone)]
pub struct GithubApiService {
    config: Config,
}

impl GithubApiService {
    /// Creates new GitHub API service.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn get_client(&self) -> Result<Client, GitHubError> {
        get_authenticated_client_builder(&self.config)?
            .build()
            .map_err(GitHubError::from)
    }

    fn build_url(&self, path: String) -> String {
        build_github_url(&self.config, path)
    }

    /// Keep upstream status and body on failure.
    async fn check_status(response: Response) -> Result<Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(GitHubError::UpstreamError {
            status: status.as_u16(),
            message,
        })
    }

    async fn get(&self, url: String, query: &[(&str, String)]) -> Result<Response, GitHubError> {
        let response = self.get_client()?.get(url).query(query).send().await?;
        Self::check_status(response).await
    }
}

#[async_trait]
impl ApiService for GithubApiService {
    #[tracing::instrument(skip(self))]
    async fn review_comments_list(
        &self,
        owner: &str,
        name: &str,
        since: OffsetDateTime,
        page: u32,
    ) -> Result<Vec<GhReviewComment>> {
        let since = since
            .format(&Rfc3339)
            .map_err(|e| ApiError::ImplementationError { source: e.into() })?;

        Ok(self
            .get(
                self.build_url(format!("/repos/{owner}/{name}/pulls/comments")),
                &[
                    ("sort", "created".into()),
                    ("direction", "desc".into()),
                    ("since", since),
                    ("per_page", REVIEW_COMMENTS_PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?
            .json::<Vec<GhReviewComment>>()
            .await
            .map_err(GitHubError::from)?)
    }

    #[tracing::instrument(skip(self))]
    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest> {
        Ok(self
            .get(
                self.build_url(format!("/repos/{owner}/{name}/pulls/{number}")),
                &[],
            )
            .await?
            .json::<GhPullRequest>()
            .await
            .map_err(GitHubError::from)?)
    }

    #[tracing::instrument(skip(self))]
    async fn review_comment_get_raw(
        &self,
        owner: &str,
        name: &str,
        comment_id: u64,
    ) -> Result<serde_json::Value> {
        Ok(self
            .get(
                self.build_url(format!("/repos/{owner}/{name}/pulls/comments/{comment_id}")),
                &[],
            )
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(GitHubError::from)?)
    }
}
