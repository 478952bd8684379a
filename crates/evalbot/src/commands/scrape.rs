use std::io::Write;

use async_trait::async_trait;
use clap::Parser;
use evalbot_core::use_cases::reviews::{ScrapeReviewsInterface, UpsertReviewsInterface};
use evalbot_models::ReviewCandidate;
use shaku::HasComponent;
use time::format_description::well_known::Rfc3339;

use super::{Command, CommandContext};
use crate::Result;

/// Fetch AI review reactions from GitHub and merge them
#[derive(Parser)]
pub(crate) struct ScrapeCommand {
    /// Number of days to look back
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=3650))]
    days: Option<u32>,
    /// Print only, do not write to the database
    #[clap(long)]
    dry_run: bool,
}

#[async_trait]
impl Command for ScrapeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let days = self.days.unwrap_or(ctx.config.scraper.default_days);
        let core_ctx = ctx.as_core_context();

        let scrape_reviews: &dyn ScrapeReviewsInterface = ctx.core_module.resolve_ref();
        let report = scrape_reviews.run(&core_ctx, days).await?;

        let mut writer = ctx.writer.write().await;
        if report.repositories == 0 {
            writeln!(writer, "No enabled repositories found; nothing to do.")?;
            return Ok(());
        }

        writeln!(
            writer,
            "Processed {} reviews ({} errors)",
            report.processed, report.errors
        )?;
        write_candidates_table(&mut *writer, &report.candidates)?;

        if self.dry_run {
            return Ok(());
        }

        let upsert_reviews: &dyn UpsertReviewsInterface = ctx.core_module.resolve_ref();
        let upserted = upsert_reviews.run(&core_ctx, report.candidates).await?;
        writeln!(writer, "Upserted {} records", upserted)?;

        Ok(())
    }
}

fn write_candidates_table(writer: &mut dyn Write, candidates: &[ReviewCandidate]) -> Result<()> {
    if candidates.is_empty() {
        return Ok(());
    }

    let id_width = candidates
        .iter()
        .map(|c| c.ai_review_id.len())
        .max()
        .unwrap_or_default()
        .max("REVIEW".len());

    writeln!(
        writer,
        "{:<id_width$}  {:<9}  {:>3}  {:>3}  {:<12}  CREATED",
        "REVIEW", "SENTIMENT", "+", "-", "VERSION"
    )?;
    for candidate in candidates {
        writeln!(
            writer,
            "{:<id_width$}  {:<9}  {:>3}  {:>3}  {:<12}  {}",
            candidate.ai_review_id,
            candidate.sentiment.map(|s| s.to_str()).unwrap_or("-"),
            candidate.positive_reactions,
            candidate.negative_reactions,
            candidate.workflow_version.as_deref().unwrap_or("-"),
            candidate.created_at.format(&Rfc3339)?,
        )?;
    }

    Ok(())
}
