use async_trait::async_trait;
use clap::Parser;
use evalbot_models::RepositoryPath;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Enable or disable scraping for a repository
#[derive(Parser)]
pub(crate) struct RepositorySetEnabledCommand {
    /// Repository path (e.g. `cockroachdb/molt`)
    repository_path: RepositoryPath,
    /// Value
    #[clap(action = clap::ArgAction::Set)]
    value: bool,
}

#[async_trait]
impl Command for RepositorySetEnabledCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        ctx.db_service
            .repositories_set_enabled(&self.repository_path.full_name(), self.value)
            .await?;

        let state = if self.value { "enabled" } else { "disabled" };
        writeln!(
            ctx.writer.write().await,
            "Repository {} {state}.",
            self.repository_path
        )?;

        Ok(())
    }
}
