use serde::{Deserialize, Serialize};

/// GitHub reaction rollup attached to a comment.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct GhReactions {
    /// Total count.
    #[serde(default)]
    pub total_count: u64,
    /// Thumbs up.
    #[serde(rename = "+1", default)]
    pub plus_one: u64,
    /// Thumbs down.
    #[serde(rename = "-1", default)]
    pub minus_one: u64,
}
