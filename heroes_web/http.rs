use axum::{Router, extract::DefaultBodyLimit, routing::get};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use heroes_app::{app_bus::AppBus, storage::ImageStore};
use heroes_types::errors::{ApplicationError, Result};

use crate::handlers::{create_hero, delete_hero, get_hero, list_heroes, update_hero};

#[derive(Clone)]
pub struct AppState {
    pub app_bus: Arc<AppBus>,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(app_bus: Arc<AppBus>, images: Arc<dyn ImageStore>) -> AppState {
        AppState { app_bus, images }
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        let config = state.app_bus.config().clone();

        Router::new()
            .route("/api/heroes", get(list_heroes).post(create_hero))
            .route(
                "/api/heroes/{id}",
                get(get_hero).patch(update_hero).delete(delete_hero),
            )
            .nest_service("/images", ServeDir::new(config.images_dir()))
            .nest_service("/admin", ServeDir::new(&config.admin_dir))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.max_upload_bytes))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(infra_error)?;

        Self::serve_on(listener, state).await
    }

    /// Serves on an already bound listener.
    pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), ApplicationError> {
        let addr = listener.local_addr().map_err(infra_error)?;
        tracing::info!("HTTP Server started, listening on http://{}", addr);

        axum::serve(listener, Self::router(state))
            .await
            .map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
