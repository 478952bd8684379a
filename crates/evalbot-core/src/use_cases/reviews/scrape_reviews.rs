use async_trait::async_trait;
use evalbot_models::ReviewCandidate;
use shaku::{Component, HasComponent, Interface};
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use super::FetchReviewCandidatesInterface;
use crate::{CoreContext, DomainError, Result};

/// Outcome of a scraping run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Enabled repositories visited.
    pub repositories: usize,
    pub candidates: Vec<ReviewCandidate>,
    pub processed: usize,
    /// Repositories which could not be scraped.
    pub errors: usize,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ScrapeReviewsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, days: u32) -> Result<ScrapeReport>;
}

#[derive(Component)]
#[shaku(interface = ScrapeReviewsInterface)]
pub(crate) struct ScrapeReviews;

#[async_trait]
impl ScrapeReviewsInterface for ScrapeReviews {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, days: u32) -> Result<ScrapeReport> {
        let since = OffsetDateTime::now_utc()
            .checked_sub(Duration::days(days.into()))
            .ok_or(DomainError::InvalidLookback { days })?;

        let repositories = ctx.db_service.repositories_list_enabled().await?;
        let mut report = ScrapeReport {
            repositories: repositories.len(),
            ..Default::default()
        };

        if repositories.is_empty() {
            return Ok(report);
        }

        let fetch_review_candidates: &dyn FetchReviewCandidatesInterface =
            ctx.core_module.resolve_ref();

        for repository in repositories {
            let repository_path = match repository.path() {
                Ok(p) => p,
                Err(e) => {
                    warn!(
                        repo_name = repository.repo_name,
                        error = %e,
                        message = "Invalid repository name, skipping"
                    );
                    report.errors += 1;
                    continue;
                }
            };

            match fetch_review_candidates
                .run(ctx, &repository_path, since)
                .await
            {
                Ok(candidates) => {
                    info!(
                        repo_name = repository.repo_name,
                        count = candidates.len(),
                        message = "Fetched review candidates"
                    );
                    report.candidates.extend(candidates);
                }
                Err(e) => {
                    warn!(
                        repo_name = repository.repo_name,
                        error = %e,
                        message = "Could not fetch review candidates"
                    );
                    report.errors += 1;
                }
            }
        }

        report.processed = report.candidates.len();
        Ok(report)
    }
}
