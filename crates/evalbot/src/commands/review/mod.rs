//! Review commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod list;
mod show;

use self::{list::ReviewListCommand, show::ReviewShowCommand};

/// Browse stored AI reviews
#[derive(Parser)]
pub(crate) struct ReviewCommand {
    #[clap(subcommand)]
    inner: ReviewSubCommand,
}

#[async_trait]
impl Command for ReviewCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum ReviewSubCommand {
    List(ReviewListCommand),
    Show(ReviewShowCommand),
}

#[async_trait]
impl Command for ReviewSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::List(sub) => sub.execute(ctx).await,
            Self::Show(sub) => sub.execute(ctx).await,
        }
    }
}
