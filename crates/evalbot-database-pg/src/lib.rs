//! Postgres driver for the review store.
//!
//! The `repository` and `ai_review` tables are owned by the migrations
//! embedded from `migrations/`, applied at startup before the pool is
//! handed to [`PostgresDb`].

mod fields;
mod postgres;
mod row;
mod utils;

use std::{ops::Deref, time::Duration};

use evalbot_config::Config;
use evalbot_database_interface::{DatabaseError, Result};
use sqlx::{
    migrate::{Migrate, Migrator},
    postgres::PgPoolOptions,
    Acquire,
};
use tracing::info;

pub type DbPool = sqlx::postgres::PgPool;
pub use postgres::PostgresDb;
pub use utils::{
    create_db_pool_connection, create_db_url, get_base_url, setup_test_db, teardown_test_db,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn run_migrations<'a, A>(migrator: A) -> Result<()>
where
    A: Acquire<'a>,
    <A::Connection as Deref>::Target: Migrate,
{
    info!(
        migrations = MIGRATOR.iter().count(),
        message = "Applying review store migrations"
    );

    MIGRATOR
        .run(migrator)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
}

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(
            config.database.pg.connection_timeout.into(),
        ))
        .max_connections(config.database.pg.pool_size)
}

pub async fn establish_pool_connection(config: &Config) -> Result<DbPool> {
    info!(
        pool_size = config.database.pg.pool_size,
        connection_timeout = config.database.pg.connection_timeout,
        message = "Connecting to the review store"
    );

    pool_options(config)
        .connect(&config.database.pg.url)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
}

/// Connect, apply pending migrations, and wrap the pool.
pub async fn connect_review_store(config: &Config) -> Result<PostgresDb> {
    let pool = establish_pool_connection(config).await?;
    run_migrations(&pool).await?;

    Ok(PostgresDb::new(pool))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn migrations_create_review_tables() {
        let migrations: Vec<_> = MIGRATOR.iter().collect();

        assert_eq!(migrations.len(), 1);
        assert!(migrations[0].sql.contains("ai_review"));
        assert!(migrations[0].sql.contains("repository"));
    }

    #[test]
    fn pool_options_follow_config() {
        let mut config = Config::from_env_no_version().unwrap();
        config.database.pg.pool_size = 7;
        config.database.pg.connection_timeout = 3;

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 7);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
    }
}
