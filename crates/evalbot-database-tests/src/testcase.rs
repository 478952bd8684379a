use evalbot_config::Config;
use evalbot_database_interface::DbService;
use evalbot_database_memory::MemoryDb;
use evalbot_database_pg::{
    create_db_pool_connection, create_db_url, get_base_url, setup_test_db, teardown_test_db,
    PostgresDb,
};
use futures::Future;
use tracing::info;

type BlockResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

fn test_config(test_name: &str) -> (Config, String, String) {
    let mut config = Config::from_env_no_version().unwrap();
    let full_name = format!("test-evalbot-{test_name}");
    let base_url = get_base_url(&config.database.pg.url);
    let new_url = create_db_url(&base_url, &full_name);
    config.database.pg.url.clone_from(&new_url);
    config.database.pg.pool_size = 2;
    config.database.pg.connection_timeout = 5;

    (config, base_url, full_name)
}

/// Run a test block against the memory store, then against Postgres when
/// `BOT_DATABASE_PG_URL` is set.
pub async fn db_test_case<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = BlockResult>,
{
    {
        // In memory
        let mem_db = Box::new(MemoryDb::new());
        info!("running memory test {test_name} ...");
        block(mem_db).await.unwrap();
    }

    db_test_case_pg(test_name, block).await;
}

pub async fn db_test_case_pg<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = BlockResult>,
{
    let (config, base_url, full_name) = test_config(test_name);
    if base_url.is_empty() {
        info!("skipping postgres test {full_name}, no database URL");
        return;
    }

    setup_test_db(&base_url, &full_name).await;

    let pool = create_db_pool_connection(&config, &base_url, &full_name).await;
    let pg_db = Box::new(PostgresDb::new(pool));
    info!("running postgres test {full_name} ...");
    block(pg_db).await.unwrap();

    teardown_test_db(&base_url, &full_name).await;
}
