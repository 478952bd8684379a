//! Null driver for GH API.

#![warn(missing_docs)]
#![warn(clippy::all)]

use async_trait::async_trait;
use evalbot_ghapi_interface::{
    types::{GhPullRequest, GhReviewComment},
    ApiService, Result,
};
use time::OffsetDateTime;

/// Null API service.
#[derive(Clone, Default)]
pub struct NullApiService {
    _private: (),
}

impl NullApiService {
    /// Build a null API service.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl ApiService for NullApiService {
    #[tracing::instrument(skip(self), ret)]
    async fn review_comments_list(
        &self,
        owner: &str,
        name: &str,
        since: OffsetDateTime,
        page: u32,
    ) -> Result<Vec<GhReviewComment>> {
        Ok(vec![])
    }

    #[tracing::instrument(skip(self), ret)]
    async fn pulls_get(&self, owner: &str, name: &str, number: u64) -> Result<GhPullRequest> {
        Ok(GhPullRequest {
            number,
            title: String::new(),
            html_url: format!("https://github.com/{owner}/{name}/pull/{number}"),
        })
    }

    #[tracing::instrument(skip(self), ret)]
    async fn review_comment_get_raw(
        &self,
        owner: &str,
        name: &str,
        comment_id: u64,
    ) -> Result<serde_json::Value> {
        Ok(serde_json::json!({ "id": comment_id }))
    }
}
