use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List known repositories
#[derive(Parser)]
pub(crate) struct RepositoryListCommand;

#[async_trait]
impl Command for RepositoryListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let repos = ctx.db_service.repositories_all().await?;
        if repos.is_empty() {
            writeln!(ctx.writer.write().await, "No repository known.")?;
        } else {
            for repo in repos {
                let state = if repo.enabled { "enabled" } else { "disabled" };
                match repo.team {
                    Some(team) => writeln!(
                        ctx.writer.write().await,
                        "- {} ({state}, team: {team})",
                        repo.repo_name
                    )?,
                    None => writeln!(ctx.writer.write().await, "- {} ({state})", repo.repo_name)?,
                }
            }
        }

        Ok(())
    }
}
