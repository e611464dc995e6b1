//! HTTP server assembly.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tracing::info;

use parrot_core::{SimulationConfig, UploadStore};

use crate::handlers;

/// Uploads are held in memory just long enough to measure their size.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UploadStore>,
    pub config: Arc<SimulationConfig>,
}

/// The mock transcription API server.
pub struct ApiServer {
    addr: SocketAddr,
    state: AppState,
}

impl ApiServer {
    pub fn new(addr: SocketAddr, store: Arc<dyn UploadStore>, config: Arc<SimulationConfig>) -> Self {
        Self {
            addr,
            state: AppState { store, config },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::info))
            .route("/health", get(health))
            .route("/api/upload", post(handlers::upload))
            .route("/api/status/:id", get(handlers::status))
            .route("/api/uploads", get(handlers::list))
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server (blocks until shutdown).
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "parrot listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}
