use evalbot_database_interface::DatabaseError;
use evalbot_models::{Pagination, Repository, RepositoryFilter};
use pretty_assertions::assert_eq;

use crate::testcase::db_test_case;

fn repository(repo_name: &str) -> Repository {
    Repository {
        repo_name: repo_name.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create() {
    db_test_case("repository_create", |db| async move {
        let repo = db
            .repositories_create(repository("cockroachdb/molt").with_team("molt"))
            .await?;

        assert_eq!(repo.repo_name, "cockroachdb/molt");
        assert!(repo.enabled);
        assert_eq!(repo.team.as_deref(), Some("molt"));

        assert!(matches!(
            db.repositories_create(repository("cockroachdb/molt")).await,
            Err(DatabaseError::RepositoryAlreadyExists(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_invalid_name() {
    db_test_case("repository_create_invalid_name", |db| async move {
        for repo_name in ["molt", "cockroachdb/", "/molt", "cockroachdb/molt/extra"] {
            assert!(matches!(
                db.repositories_create(repository(repo_name)).await,
                Err(DatabaseError::InvalidRepository { .. })
            ));
        }
        assert!(db.repositories_all().await?.is_empty());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("repository_get", |db| async move {
        assert_eq!(db.repositories_get("does/not-exist").await?, None);
        assert!(matches!(
            db.repositories_get_expect("does/not-exist").await,
            Err(DatabaseError::UnknownRepository(_))
        ));

        let repo = db
            .repositories_create(repository("cockroachdb/molt"))
            .await?;
        assert_eq!(db.repositories_get("cockroachdb/molt").await?, Some(repo));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list() {
    db_test_case("repository_list", |db| async move {
        db.repositories_create(repository("cockroachdb/replicator").with_enabled(false))
            .await?;
        db.repositories_create(repository("cockroachlabs/managed-service"))
            .await?;
        db.repositories_create(repository("cockroachdb/molt"))
            .await?;

        let names = |repos: Vec<Repository>| -> Vec<String> {
            repos.into_iter().map(|r| r.repo_name).collect()
        };

        assert_eq!(
            names(db.repositories_all().await?),
            vec![
                "cockroachdb/molt",
                "cockroachdb/replicator",
                "cockroachlabs/managed-service"
            ]
        );
        assert_eq!(
            names(db.repositories_list_enabled().await?),
            vec!["cockroachdb/molt", "cockroachlabs/managed-service"]
        );
        assert_eq!(
            names(
                db.repositories_list(RepositoryFilter {
                    enabled_only: false,
                    pagination: Pagination::new(1, 1),
                })
                .await?
            ),
            vec!["cockroachdb/replicator"]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_enabled_and_team() {
    db_test_case("repository_set_enabled_and_team", |db| async move {
        assert!(matches!(
            db.repositories_set_enabled("does/not-exist", false).await,
            Err(DatabaseError::UnknownRepository(_))
        ));

        db.repositories_create(repository("cockroachdb/molt"))
            .await?;

        let repo = db.repositories_set_enabled("cockroachdb/molt", false).await?;
        assert!(!repo.enabled);

        let repo = db
            .repositories_set_team("cockroachdb/molt", Some("migrations".into()))
            .await?;
        assert_eq!(repo.team.as_deref(), Some("migrations"));

        let repo = db.repositories_set_team("cockroachdb/molt", None).await?;
        assert_eq!(repo.team, None);
        assert!(!repo.enabled);

        Ok(())
    })
    .await;
}
