use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use evalbot_database_interface::{DatabaseError, DbService, Result};
use evalbot_models::{
    now_utc_micros, truncate_to_micros, Repository, RepositoryFilter, Review, ReviewCandidate,
    ReviewFilter,
};
use time::Duration;

/// In-memory store. Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryDb {
    repositories: Arc<RwLock<HashMap<String, Repository>>>,
    reviews: Arc<RwLock<HashMap<String, Review>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn sorted_reviews(&self) -> Vec<Review> {
        let mut values: Vec<_> = self.reviews.read().unwrap().values().cloned().collect();
        values.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.ai_review_id.cmp(&b.ai_review_id))
        });
        values
    }

    fn update_repository<F: FnOnce(&mut Repository)>(
        &self,
        repo_name: &str,
        f: F,
    ) -> Result<Repository> {
        let mut repositories = self.repositories.write().unwrap();
        let repository = repositories
            .get_mut(repo_name)
            .ok_or_else(|| DatabaseError::UnknownRepository(repo_name.into()))?;
        f(repository);
        Ok(repository.clone())
    }
}

/// Keep the last candidate for each identifier.
fn dedupe_candidates(candidates: Vec<ReviewCandidate>) -> Vec<ReviewCandidate> {
    let mut seen = HashSet::new();
    let mut output: Vec<_> = candidates
        .into_iter()
        .rev()
        .filter(|c| seen.insert(c.ai_review_id.clone()))
        .collect();
    output.reverse();
    output
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn repositories_create(&self, mut instance: Repository) -> Result<Repository> {
        instance.path()?;

        let mut repositories = self.repositories.write().unwrap();
        if repositories.contains_key(&instance.repo_name) {
            return Err(DatabaseError::RepositoryAlreadyExists(instance.repo_name));
        }

        instance.subscribed_at = truncate_to_micros(instance.subscribed_at);
        repositories.insert(instance.repo_name.clone(), instance.clone());
        Ok(instance)
    }

    async fn repositories_all(&self) -> Result<Vec<Repository>> {
        self.repositories_list(RepositoryFilter::default()).await
    }

    async fn repositories_list(&self, filter: RepositoryFilter) -> Result<Vec<Repository>> {
        let mut values: Vec<_> = self
            .repositories
            .read()
            .unwrap()
            .values()
            .filter(|r| !filter.enabled_only || r.enabled)
            .cloned()
            .collect();
        values.sort_by(|a, b| a.repo_name.cmp(&b.repo_name));
        Ok(filter.pagination.apply(values.into_iter()).collect())
    }

    async fn repositories_get(&self, repo_name: &str) -> Result<Option<Repository>> {
        Ok(self.repositories.read().unwrap().get(repo_name).cloned())
    }

    async fn repositories_set_enabled(&self, repo_name: &str, value: bool) -> Result<Repository> {
        self.update_repository(repo_name, |r| r.enabled = value)
    }

    async fn repositories_set_team(
        &self,
        repo_name: &str,
        team: Option<String>,
    ) -> Result<Repository> {
        self.update_repository(repo_name, |r| r.team = team)
    }

    async fn reviews_upsert(&self, candidates: Vec<ReviewCandidate>) -> Result<usize> {
        if candidates.is_empty() {
            return Ok(0);
        }

        let count = candidates.len();
        for candidate in &candidates {
            candidate.validate()?;
        }

        let mut reviews = self.reviews.write().unwrap();
        let now = now_utc_micros();
        for candidate in dedupe_candidates(candidates) {
            match reviews.get_mut(&candidate.ai_review_id) {
                Some(review) => {
                    let last_updated = now.max(review.last_updated + Duration::microseconds(1));
                    review.merge(candidate, last_updated);
                }
                None => {
                    reviews.insert(candidate.ai_review_id.clone(), candidate.into_review(now));
                }
            }
        }

        Ok(count)
    }

    async fn reviews_all(&self) -> Result<Vec<Review>> {
        Ok(self.sorted_reviews())
    }

    async fn reviews_list(&self, filter: ReviewFilter) -> Result<Vec<Review>> {
        let values = self
            .sorted_reviews()
            .into_iter()
            .filter(|r| filter.matches(&r.repo_name, r.sentiment));
        Ok(filter.pagination.apply(values).collect())
    }

    async fn reviews_get(&self, ai_review_id: &str) -> Result<Option<Review>> {
        Ok(self.reviews.read().unwrap().get(ai_review_id).cloned())
    }

    async fn reviews_count(&self) -> Result<u64> {
        Ok(self.reviews.read().unwrap().len() as u64)
    }
}
