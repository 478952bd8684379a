use async_trait::async_trait;
use clap::Parser;
use evalbot_models::{Repository, RepositoryPath};

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Add repository
#[derive(Parser)]
pub(crate) struct RepositoryAddCommand {
    /// Repository path (e.g. `cockroachdb/molt`)
    repository_path: RepositoryPath,
    /// Owning team
    #[clap(long)]
    team: Option<String>,
    /// Register the repository as disabled
    #[clap(long)]
    disabled: bool,
}

#[async_trait]
impl Command for RepositoryAddCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let mut repository = Repository::new(&self.repository_path).with_enabled(!self.disabled);
        repository.team = self.team;
        ctx.db_service.repositories_create(repository).await?;

        writeln!(
            ctx.writer.write().await,
            "Repository {} created.",
            self.repository_path
        )?;
        Ok(())
    }
}
