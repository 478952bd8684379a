use std::{io::Write, sync::Arc};

use clap::Parser;
use evalbot_config::Config;
use evalbot_core::CoreModule;
use evalbot_database_memory::MemoryDb;
use evalbot_ghapi_interface::MockApiService;
use evalbot_models::{RepositoryPath, ReviewCandidate, Sentiment};
use time::{macros::datetime, Duration};
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub api_service: MockApiService,
    pub db_service: MemoryDb,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self::new_with_db(MemoryDb::new())
    }

    /// Reuse an existing store, to chain commands on the same data.
    pub fn new_with_db(db_service: MemoryDb) -> Self {
        Self {
            config: Config::from_env_no_version().unwrap(),
            core_module: CoreModule::builder().build(),
            db_service,
            api_service: MockApiService::new(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            api_service: Box::new(self.api_service),
            writer,
        }
    }
}

async fn run_command(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> (anyhow::Result<()>, String) {
    let buf = Arc::new(RwLock::new(Vec::new()));

    let result = {
        let command_args = {
            let mut tmp_args = vec!["evalbot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => {
                CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await
            }
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    };

    let vec = buf.read().await.to_vec();
    (result, std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, output) = run_command(ctx, command_args).await;
    result.unwrap();
    output
}

/// Run a command expected to fail, returning the error message.
pub(crate) async fn test_command_error(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, _) = run_command(ctx, command_args).await;
    result.unwrap_err().to_string()
}

/// Positive review candidate on PR 10, created on March `comment_id`, 2024 at 10:00 UTC.
pub(crate) fn sample_candidate(repo_name: &str, comment_id: u64) -> ReviewCandidate {
    let path = RepositoryPath::new(repo_name).unwrap();
    let created_at = datetime!(2024-03-01 10:00 UTC) + Duration::days(comment_id as i64 - 1);

    ReviewCandidate {
        ai_review_id: ReviewCandidate::review_id_for_comment(&path, comment_id),
        repo_name: repo_name.into(),
        pr_number: 10,
        pr_url: format!("https://github.com/{repo_name}/pull/10"),
        pr_title: Some("Add feature".into()),
        pr_review_id: 500 + comment_id,
        review_comment_id: comment_id,
        review_comment_url: format!(
            "https://api.github.com/repos/{repo_name}/pulls/comments/{comment_id}"
        ),
        original_commit_sha: Some("abcdef".into()),
        workflow_version: Some("v1.0.0".into()),
        created_at,
        sentiment: Some(Sentiment::Positive),
        positive_reactions: 1,
        negative_reactions: 0,
    }
}
