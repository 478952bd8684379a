use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use time::OffsetDateTime;

use super::{GhReactions, GhUser};

/// GitHub Pull request review comment.
#[derive(Debug, Deserialize, Serialize, Clone, SmartDefault, PartialEq, Eq)]
pub struct GhReviewComment {
    /// ID.
    pub id: u64,
    /// Parent review ID.
    pub pull_request_review_id: Option<u64>,
    /// User.
    pub user: GhUser,
    /// Body.
    #[serde(default)]
    pub body: String,
    /// API URL.
    pub url: String,
    /// Web URL.
    pub html_url: String,
    /// Pull request API URL.
    pub pull_request_url: String,
    /// Commit the comment was originally made on.
    pub original_commit_id: Option<String>,
    /// Created at.
    #[default(OffsetDateTime::now_utc())]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Reactions.
    #[serde(default)]
    pub reactions: GhReactions,
}

impl GhReviewComment {
    /// Pull request number, from the pull request URL.
    pub fn pull_request_number(&self) -> Option<u64> {
        self.pull_request_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|n| n.parse().ok())
    }
}
