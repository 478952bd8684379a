//! GitHub types.

mod pull_request;
mod reactions;
mod review_comment;
mod user;

pub use pull_request::GhPullRequest;
pub use reactions::GhReactions;
pub use review_comment::GhReviewComment;
pub use user::GhUser;
