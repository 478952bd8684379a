use async_trait::async_trait;
use clap::Parser;
use evalbot_models::{Pagination, ReviewFilter, Sentiment};
use time::format_description::well_known::Rfc3339;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List reviews, newest first
#[derive(Parser)]
pub(crate) struct ReviewListCommand {
    /// Only keep reviews with this sentiment (positive, negative, neutral)
    #[clap(long)]
    sentiment: Option<Sentiment>,
    /// Only keep reviews of this repository (e.g. `cockroachdb/molt`)
    #[clap(long)]
    repo: Option<String>,
    /// Reviews to skip
    #[clap(long, default_value_t = 0)]
    skip: u64,
    /// Maximum reviews to show
    #[clap(long, default_value_t = Pagination::DEFAULT_LIMIT)]
    limit: u64,
}

#[async_trait]
impl Command for ReviewListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let reviews = ctx
            .db_service
            .reviews_list(ReviewFilter {
                sentiment: self.sentiment,
                repo_name: self.repo,
                pagination: Pagination::new(self.skip, self.limit),
            })
            .await?;

        let mut writer = ctx.writer.write().await;
        if reviews.is_empty() {
            writeln!(writer, "No review found.")?;
        }

        for review in reviews {
            writeln!(
                writer,
                "- {} [{}] +{}/-{} {}",
                review.ai_review_id,
                review.sentiment.map(|s| s.to_str()).unwrap_or("-"),
                review.positive_reactions,
                review.negative_reactions,
                review.created_at.format(&Rfc3339)?
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use evalbot_database_interface::DbService;
    use pretty_assertions::assert_eq;

    use crate::testutils::{sample_candidate, test_command, CommandContextTest};

    #[tokio::test]
    async fn run_no_reviews() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(ctx, &["reviews", "list"]).await,
            "No review found.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        let mut negative = sample_candidate("cockroachdb/molt", 2);
        negative.sentiment = Some(evalbot_models::Sentiment::Negative);
        negative.negative_reactions = 1;
        ctx.db_service
            .reviews_upsert(vec![
                sample_candidate("cockroachdb/molt", 1),
                negative,
                sample_candidate("cockroachdb/replicator", 3),
            ])
            .await?;
        let db = ctx.db_service.clone();

        assert_eq!(
            test_command(ctx, &["reviews", "list", "--repo", "cockroachdb/molt"]).await,
            concat!(
                "- cockroachdb/molt#2 [negative] +0/-1 2024-03-02T10:00:00Z\n",
                "- cockroachdb/molt#1 [positive] +1/-0 2024-03-01T10:00:00Z\n"
            )
        );

        assert_eq!(
            test_command(
                CommandContextTest::new_with_db(db.clone()),
                &["reviews", "list", "--sentiment", "positive", "--limit", "1"]
            )
            .await,
            "- cockroachdb/replicator#3 [positive] +1/-0 2024-03-03T10:00:00Z\n"
        );

        Ok(())
    }
}
