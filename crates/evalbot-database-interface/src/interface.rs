use async_trait::async_trait;
use evalbot_models::{Repository, RepositoryFilter, Review, ReviewCandidate, ReviewFilter};

use crate::{DatabaseError, Result};

#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    async fn repositories_create(&self, instance: Repository) -> Result<Repository>;
    /// All repositories, ordered by name.
    async fn repositories_all(&self) -> Result<Vec<Repository>>;
    async fn repositories_list(&self, filter: RepositoryFilter) -> Result<Vec<Repository>>;
    async fn repositories_list_enabled(&self) -> Result<Vec<Repository>> {
        self.repositories_list(RepositoryFilter {
            enabled_only: true,
            ..Default::default()
        })
        .await
    }
    async fn repositories_get(&self, repo_name: &str) -> Result<Option<Repository>>;
    async fn repositories_get_expect(&self, repo_name: &str) -> Result<Repository> {
        self.repositories_get(repo_name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownRepository(repo_name.into()))
    }
    async fn repositories_set_enabled(&self, repo_name: &str, value: bool) -> Result<Repository>;
    async fn repositories_set_team(
        &self,
        repo_name: &str,
        team: Option<String>,
    ) -> Result<Repository>;

    /// Merge candidates in a single atomic write.
    ///
    /// Returns the number of submitted candidates.
    async fn reviews_upsert(&self, candidates: Vec<ReviewCandidate>) -> Result<usize>;
    /// All reviews, newest first.
    async fn reviews_all(&self) -> Result<Vec<Review>>;
    async fn reviews_list(&self, filter: ReviewFilter) -> Result<Vec<Review>>;
    async fn reviews_get(&self, ai_review_id: &str) -> Result<Option<Review>>;
    async fn reviews_get_expect(&self, ai_review_id: &str) -> Result<Review> {
        self.reviews_get(ai_review_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownReview(ai_review_id.into()))
    }
    async fn reviews_count(&self) -> Result<u64>;
}
