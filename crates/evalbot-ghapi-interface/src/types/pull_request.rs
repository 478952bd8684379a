use serde::{Deserialize, Serialize};

/// GitHub Pull request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequest {
    /// Number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Web URL.
    pub html_url: String,
}
