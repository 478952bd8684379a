use async_trait::async_trait;
use evalbot_models::ReviewCandidate;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait UpsertReviewsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, candidates: Vec<ReviewCandidate>)
        -> Result<usize>;
}

#[derive(Component)]
#[shaku(interface = UpsertReviewsInterface)]
pub(crate) struct UpsertReviews;

#[async_trait]
impl UpsertReviewsInterface for UpsertReviews {
    #[tracing::instrument(skip_all, fields(count = candidates.len()))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        candidates: Vec<ReviewCandidate>,
    ) -> Result<usize> {
        if candidates.is_empty() {
            return Ok(0);
        }

        let count = ctx.db_service.reviews_upsert(candidates).await?;
        info!(count = count, message = "Merged review candidates");

        Ok(count)
    }
}
