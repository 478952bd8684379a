use async_trait::async_trait;
use clap::Parser;
use evalbot_models::RepositoryPath;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Set or remove the owning team of a repository
#[derive(Parser)]
pub(crate) struct RepositorySetTeamCommand {
    /// Repository path (e.g. `cockroachdb/molt`)
    repository_path: RepositoryPath,
    /// Team, removed when omitted
    #[clap(long)]
    team: Option<String>,
}

#[async_trait]
impl Command for RepositorySetTeamCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        ctx.db_service
            .repositories_set_team(&self.repository_path.full_name(), self.team.clone())
            .await?;

        match self.team {
            Some(team) => writeln!(
                ctx.writer.write().await,
                "Team of repository {} set to '{team}'.",
                self.repository_path
            )?,
            None => writeln!(
                ctx.writer.write().await,
                "Team of repository {} removed.",
                self.repository_path
            )?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use evalbot_database_interface::DbService;
    use evalbot_models::{Repository, RepositoryPath};
    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        let db = ctx.db_service.clone();
        ctx.db_service
            .repositories_create(
                Repository::new(&RepositoryPath::new("cockroachdb/molt")?).with_team("old"),
            )
            .await?;

        assert_eq!(
            test_command(
                ctx,
                &["repositories", "set-team", "cockroachdb/molt", "--team", "migrations"]
            )
            .await,
            "Team of repository cockroachdb/molt set to 'migrations'.\n"
        );
        assert_eq!(
            db.repositories_get_expect("cockroachdb/molt").await?.team.as_deref(),
            Some("migrations")
        );

        assert_eq!(
            test_command(
                CommandContextTest::new_with_db(db.clone()),
                &["repositories", "set-team", "cockroachdb/molt"]
            )
            .await,
            "Team of repository cockroachdb/molt removed.\n"
        );
        assert_eq!(db.repositories_get_expect("cockroachdb/molt").await?.team, None);

        Ok(())
    }
}
