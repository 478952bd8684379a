//! Repository commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod add;
mod list;
mod seed;
mod set_enabled;
mod set_team;
mod show;

use self::{
    add::RepositoryAddCommand, list::RepositoryListCommand, seed::RepositorySeedCommand,
    set_enabled::RepositorySetEnabledCommand, set_team::RepositorySetTeamCommand,
    show::RepositoryShowCommand,
};

/// Manage the repository registry
#[derive(Parser)]
pub(crate) struct RepositoryCommand {
    #[clap(subcommand)]
    inner: RepositorySubCommand,
}

#[async_trait]
impl Command for RepositoryCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum RepositorySubCommand {
    Add(RepositoryAddCommand),
    List(RepositoryListCommand),
    Show(RepositoryShowCommand),
    SetEnabled(RepositorySetEnabledCommand),
    SetTeam(RepositorySetTeamCommand),
    Seed(RepositorySeedCommand),
}

#[async_trait]
impl Command for RepositorySubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Add(sub) => sub.execute(ctx).await,
            Self::List(sub) => sub.execute(ctx).await,
            Self::Show(sub) => sub.execute(ctx).await,
            Self::SetEnabled(sub) => sub.execute(ctx).await,
            Self::SetTeam(sub) => sub.execute(ctx).await,
            Self::Seed(sub) => sub.execute(ctx).await,
        }
    }
}
