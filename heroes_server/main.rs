use std::sync::Arc;

use heroes_app::{app_bus::AppBus, config::Config, storage::ImageStore};
use heroes_db::{
    FsImageStore, establish_connection_pool, run_migrations, uow::PostgresUnitOfWorkProvider,
};
use heroes_types::errors::{ApplicationError, Result};
use heroes_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let config = Arc::new(Config::from_env());
    let _log_guard = setup_logging(&config.log_dir);
    tracing::debug!("Loaded configuration: {:?}", config);

    let state = setup_app(config.clone()).await?;
    WebRouter::serve(state, config.port).await
}

async fn setup_app(config: Arc<Config>) -> Result<AppState, ApplicationError> {
    let db_pool = establish_connection_pool().await?;
    if let Err(e) = run_migrations(&db_pool).await {
        tracing::error!("Unable to run migrations: {e}");
    }

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider));
    let images: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(&config.uploads_dir));

    Ok(AppState::new(app_bus, images))
}
