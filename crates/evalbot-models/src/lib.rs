mod filters;
mod repository;
mod repository_path;
mod review;
mod sentiment;
pub mod stats;
mod timestamp;

pub use filters::{Pagination, RepositoryFilter, ReviewFilter};
pub use repository::Repository;
pub use repository_path::{RepositoryPath, RepositoryPathError};
pub use review::{Review, ReviewCandidate, ReviewValidationError};
pub use sentiment::{Sentiment, SentimentError};
pub use timestamp::{now_utc_micros, truncate_to_micros};
