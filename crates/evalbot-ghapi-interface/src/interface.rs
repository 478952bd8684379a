use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    types::{GhPullRequest, GhReviewComment},
    Result,
};

/// Page size used when listing review comments.
pub const REVIEW_COMMENTS_PER_PAGE: u32 = 100;

/// GitHub API Adapter interface
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// List one page of pull request review comments of a repository,
    /// newest first, created or updated since a date.
    async fn review_comments_list(
        &self,
        owner: &str,
        name: &str,
        since: OffsetDateTime,
        page: u32,
    ) -> Result<Vec<GhReviewComment>>;
    /// Get a pull request.
    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest>;
    /// Get a raw review comment payload.
    async fn review_comment_get_raw(
        &self,
        owner: &str,
        name: &str,
        comment_id: u64,
    ) -> Result<serde_json::Value>;
}
