//! Logic module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, Result};
use shaku::module;
use use_cases::{
    repositories::seed_repositories::SeedRepositories,
    reviews::{
        fetch_review_candidates::FetchReviewCandidates, scrape_reviews::ScrapeReviews,
        upsert_reviews::UpsertReviews,
    },
    stats::build_statistics::BuildStatistics,
};

module! {
    pub CoreModule {
        components = [
            UpsertReviews, FetchReviewCandidates, ScrapeReviews,
            SeedRepositories, BuildStatistics
        ],
        providers = []
    }
}
