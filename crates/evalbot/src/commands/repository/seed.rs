use async_trait::async_trait;
use clap::Parser;
use evalbot_core::use_cases::repositories::SeedRepositoriesInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Register the default repositories
#[derive(Parser)]
pub(crate) struct RepositorySeedCommand;

#[async_trait]
impl Command for RepositorySeedCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let seed_repositories: &dyn SeedRepositoriesInterface = ctx.core_module.resolve_ref();
        let created = seed_repositories.run(&ctx.as_core_context()).await?;

        if created.is_empty() {
            writeln!(
                ctx.writer.write().await,
                "All default repositories already exist."
            )?;
        } else {
            for repository in created {
                writeln!(
                    ctx.writer.write().await,
                    "Repository {} created.",
                    repository.repo_name
                )?;
            }
        }

        Ok(())
    }
}
