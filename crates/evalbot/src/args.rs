use std::sync::Arc;

use clap::Parser;
use evalbot_config::{ApiDriver, Config, DatabaseDriver};
use evalbot_core::CoreModule;
use evalbot_database_interface::DbService;
use evalbot_database_memory::MemoryDb;
use evalbot_database_pg::connect_review_store;
use evalbot_ghapi_interface::ApiService;
use evalbot_ghapi_null::NullApiService;
use evalbot_sentry::with_sentry_configuration;
use evalbot_server::ghapi::MetricsApiService;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let db_service: Box<dyn DbService> = {
                if config.database.driver == DatabaseDriver::Postgres {
                    info!("Using PostgresDb database driver");

                    Box::new(connect_review_store(&config).await?)
                } else {
                    info!("Using MemoryDb database driver");
                    Box::new(MemoryDb::new())
                }
            };

            let api_service: Box<dyn ApiService> = {
                if config.api.driver == ApiDriver::GitHub {
                    info!("Using MetricsApiService API driver");
                    Box::new(MetricsApiService::new(config.clone()))
                } else {
                    info!("Using NullApiService API driver");
                    Box::new(NullApiService::new())
                }
            };

            let ctx = CommandContext {
                config: config.clone(),
                db_service,
                api_service,
                core_module,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("tokio runtime should build")
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
