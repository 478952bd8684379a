use async_trait::async_trait;
use clap::Parser;
use evalbot_models::RepositoryPath;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show repository info
#[derive(Parser)]
pub(crate) struct RepositoryShowCommand {
    /// Repository path (e.g. `cockroachdb/molt`)
    repository_path: RepositoryPath,
}

#[async_trait]
impl Command for RepositoryShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let repo = ctx
            .db_service
            .repositories_get_expect(&self.repository_path.full_name())
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Accessing repository {}",
            self.repository_path
        )?;
        writeln!(ctx.writer.write().await, "{:#?}", repo)?;

        Ok(())
    }
}
