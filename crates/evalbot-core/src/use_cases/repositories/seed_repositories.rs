use async_trait::async_trait;
use evalbot_models::{Repository, RepositoryPath};
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result};

/// Default registry, as (repository, team).
pub const DEFAULT_REPOSITORIES: &[(&str, &str)] = &[
    ("cockroachdb/molt", "molt"),
    ("cockroachdb/replicator", "replicator"),
    ("cockroachlabs/managed-service", "managed-service"),
    ("cockroachlabs/crl-infrastructure", "infrastructure"),
];

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SeedRepositoriesInterface: Interface {
    /// Returns the created repositories.
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Vec<Repository>>;
}

#[derive(Component)]
#[shaku(interface = SeedRepositoriesInterface)]
pub(crate) struct SeedRepositories;

#[async_trait]
impl SeedRepositoriesInterface for SeedRepositories {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Vec<Repository>> {
        let mut created = vec![];

        for (repo_name, team) in DEFAULT_REPOSITORIES {
            let path = RepositoryPath::new(repo_name)?;
            if ctx
                .db_service
                .repositories_get(&path.full_name())
                .await?
                .is_some()
            {
                continue;
            }

            info!(repo_name = repo_name, message = "Seeding repository");
            created.push(
                ctx.db_service
                    .repositories_create(Repository::new(&path).with_team(*team))
                    .await?,
            );
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use evalbot_database_interface::DbService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn run() {
        let ctx = CoreContextTest::new();
        ctx.db_service
            .repositories_create(
                Repository::new(&RepositoryPath::new("cockroachdb/molt").unwrap())
                    .with_enabled(false),
            )
            .await
            .unwrap();

        let created = SeedRepositories.run(&ctx.as_context()).await.unwrap();
        assert_eq!(created.len(), 3);

        let all = ctx.db_service.repositories_all().await.unwrap();
        assert_eq!(all.len(), 4);

        // Existing entries are left untouched.
        let molt = ctx
            .db_service
            .repositories_get_expect("cockroachdb/molt")
            .await
            .unwrap();
        assert!(!molt.enabled);
        assert_eq!(molt.team, None);

        let infra = ctx
            .db_service
            .repositories_get_expect("cockroachlabs/crl-infrastructure")
            .await
            .unwrap();
        assert_eq!(infra.team.as_deref(), Some("infrastructure"));

        assert!(SeedRepositories
            .run(&ctx.as_context())
            .await
            .unwrap()
            .is_empty());
    }
}
