//! GitHub Api wrappers.

use async_trait::async_trait;
use evalbot_config::Config;
use evalbot_ghapi_github::GithubApiService;
use evalbot_ghapi_interface::{
    types::{GhPullRequest, GhReviewComment},
    ApiService, Result,
};
use time::OffsetDateTime;

use crate::metrics::GITHUB_API_CALLS;

/// GitHub Api Service with metrics.
pub struct MetricsApiService {
    inner: GithubApiService,
}

impl MetricsApiService {
    /// Creates a new service.
    pub fn new(config: Config) -> Self {
        Self {
            inner: GithubApiService::new(config),
        }
    }
}

#[async_trait]
impl ApiService for MetricsApiService {
    async fn review_comments_list(
        &self,
        owner: &str,
        name: &str,
        since: OffsetDateTime,
        page: u32,
    ) -> Result<Vec<GhReviewComment>> {
        GITHUB_API_CALLS.inc();
        self.inner
            .review_comments_list(owner, name, since, page)
            .await
    }

    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest> {
        GITHUB_API_CALLS.inc();
        self.inner.pulls_get(owner, name, number).await
    }

    async fn review_comment_get_raw(
        &self,
        owner: &str,
        name: &str,
        comment_id: u64,
    ) -> Result<serde_json::Value> {
        GITHUB_API_CALLS.inc();
        self.inner
            .review_comment_get_raw(owner, name, comment_id)
            .await
    }
}
