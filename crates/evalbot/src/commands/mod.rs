//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use evalbot_config::Config;
use evalbot_core::{CoreContext, CoreModule};
use evalbot_database_interface::DbService;
use evalbot_ghapi_interface::ApiService;
use tokio::sync::RwLock;

use self::{
    export::ExportCommand, import::ImportCommand, repository::RepositoryCommand,
    review::ReviewCommand, scrape::ScrapeCommand, server::ServerCommand,
};
use crate::Result;

mod export;
mod import;
mod repository;
mod review;
mod scrape;
mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub db_service: Box<dyn DbService>,
    pub api_service: Box<dyn ApiService>,
    pub core_module: CoreModule,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            api_service: self.api_service.as_ref(),
            db_service: self.db_service.as_ref(),
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Scrape(ScrapeCommand),
    Repositories(RepositoryCommand),
    Reviews(ReviewCommand),
    Export(ExportCommand),
    Import(ImportCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Scrape(sub) => sub.execute(ctx).await,
            Self::Repositories(sub) => sub.execute(ctx).await,
            Self::Reviews(sub) => sub.execute(ctx).await,
            Self::Export(sub) => sub.execute(ctx).await,
            Self::Import(sub) => sub.execute(ctx).await,
        }
    }
}
