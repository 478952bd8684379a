use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show one review
#[derive(Parser)]
pub(crate) struct ReviewShowCommand {
    /// Review identifier (e.g. `cockroachdb/molt#1234`)
    ai_review_id: String,
}

#[async_trait]
impl Command for ReviewShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let review = ctx.db_service.reviews_get_expect(&self.ai_review_id).await?;

        let mut writer = ctx.writer.write().await;
        writeln!(writer, "Review {}", review.ai_review_id)?;
        writeln!(writer, "Comment: {}", review.review_comment_web_url())?;
        writeln!(writer, "{:#?}", review)?;

        Ok(())
    }
}
