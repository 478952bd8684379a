//! GitHub API interface.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod interface;
pub mod types;

pub use errors::{ApiError, Result};
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockApiService;
pub use interface::{ApiService, REVIEW_COMMENTS_PER_PAGE};
