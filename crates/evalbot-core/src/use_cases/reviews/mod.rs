pub(crate) mod fetch_review_candidates;
pub(crate) mod scrape_reviews;
pub(crate) mod upsert_reviews;

pub use fetch_review_candidates::{parse_workflow_version, FetchReviewCandidatesInterface};
pub use scrape_reviews::{ScrapeReport, ScrapeReviewsInterface};
pub use upsert_reviews::UpsertReviewsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    fetch_review_candidates::MockFetchReviewCandidatesInterface,
    scrape_reviews::MockScrapeReviewsInterface, upsert_reviews::MockUpsertReviewsInterface,
};
