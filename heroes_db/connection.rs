use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;

use heroes_types::errors::DbError;

pub type DbPool = PgPool;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub async fn establish_connection_pool() -> Result<DbPool, DbError> {
    init_connection_pool("DATABASE_URL").await
}

pub async fn establish_test_connection_pool() -> Result<DbPool, DbError> {
    init_connection_pool("TEST_DATABASE_URL").await
}

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    sqlx::migrate!("../migrations").run(pool).await?;
    Ok(())
}

/// Connects eagerly when the database is reachable. Otherwise the failure is
/// logged and a lazy pool is returned, so requests fail until it comes up.
async fn init_connection_pool(database_env: &'static str) -> Result<DbPool, DbError> {
    dotenvy::dotenv().ok();

    let database_url = env::var(database_env).map_err(|_| DbError::MissingEnv(database_env))?;
    let max_connections = env::var("HEROES_DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);
    let options = || PgPoolOptions::new().max_connections(max_connections);

    match options().connect(&database_url).await {
        Ok(pool) => {
            tracing::info!("Connected to database");
            Ok(pool)
        }
        Err(e) => {
            tracing::error!("Database connection error: {e}");
            Ok(options().connect_lazy(&database_url)?)
        }
    }
}
