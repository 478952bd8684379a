use std::{fs::File, io::BufWriter, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;
use evalbot_database_interface::Exchanger;

use super::{Command, CommandContext};
use crate::Result;

/// Export repositories and reviews as JSON
#[derive(Parser)]
pub(crate) struct ExportCommand {
    /// Output file, written to the command output if not set
    #[clap(short, long)]
    output_file: Option<PathBuf>,
}

#[async_trait]
impl Command for ExportCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        if let Some(file_path) = self.output_file {
            let file = File::create(file_path)?;
            let mut writer = BufWriter::new(file);
            Exchanger::export_to_json(ctx.db_service.as_ref(), &mut writer).await?;
        } else {
            let mut writer = ctx.writer.write().await;
            Exchanger::export_to_json(ctx.db_service.as_ref(), &mut *writer).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use evalbot_database_interface::DbService;
    use evalbot_models::{Repository, RepositoryPath};
    use pretty_assertions::assert_eq;

    use crate::testutils::{sample_candidate, test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        ctx.db_service
            .repositories_create(Repository::new(&RepositoryPath::new("cockroachdb/molt")?))
            .await?;
        ctx.db_service
            .reviews_upsert(vec![sample_candidate("cockroachdb/molt", 1)])
            .await?;

        let output = test_command(ctx, &["export"]).await;
        let value: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!(value["repositories"][0]["repo_name"], "cockroachdb/molt");
        assert_eq!(value["reviews"][0]["ai_review_id"], "cockroachdb/molt#1");

        Ok(())
    }
}
