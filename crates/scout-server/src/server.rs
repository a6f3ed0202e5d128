use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use scout_core::capability::{Delegate, Search};
use scout_engine::runner::PipelineRunner;
use scout_store::sessions::SessionRepo;

use crate::controller::ChatController;
use crate::handlers;

/// Server configuration.
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8787 }
    }
}

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ChatController>,
    pub store: Arc<SessionRepo>,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/research", post(handlers::submit_research))
        .route("/api/briefing", post(handlers::submit_briefing))
        .route("/api/resources", get(handlers::resource_plan))
        .route("/api/sessions", get(handlers::list_sessions))
        .route("/api/sessions/{id}/history", get(handlers::session_history))
        .route("/api/pipeline", get(handlers::pipeline_info))
        .route("/api/overlay", get(handlers::demo_overlay))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Create and start the server. Capability handles are constructed once by
/// the caller and injected here for the process lifetime.
pub async fn start(
    config: ServerConfig,
    delegate: Arc<dyn Delegate>,
    search: Arc<dyn Search>,
) -> Result<ServerHandle, std::io::Error> {
    let store = Arc::new(SessionRepo::new());
    let runner = PipelineRunner::new(delegate, search);
    let controller = Arc::new(ChatController::new(runner, Arc::clone(&store)));

    let state = AppState { controller, store };
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(port = local_addr.port(), "Scout server started");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server_handle,
    })
}

/// Handle returned by `start()` — keeps the serve task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}
