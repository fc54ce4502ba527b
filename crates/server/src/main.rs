use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use parkgen::{ExportSettings, Exporter};
use tower_http::cors::CorsLayer;

mod export;
mod routes;

const DEFAULT_ADDR: &str = "0.0.0.0:3001";

#[derive(Clone)]
pub struct AppState {
    pub exporter: Arc<Exporter>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,parkgen=info".into()),
        )
        .init();

    let state = AppState {
        exporter: Arc::new(Exporter::new(ExportSettings::load())),
    };

    let app = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/catalog", get(routes::list_catalog))
        .route("/api/export", post(routes::export_park))
        .route("/api/inspect", post(routes::inspect))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("PARKGEN_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running on http://{addr}");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
