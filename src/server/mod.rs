//! HTTP server: router assembly and startup
//!
//! Axum-based server exposing the REST analysis endpoints and the A2A
//! JSON-RPC endpoint.

pub mod models;
pub mod routes;

use crate::a2a::A2aHandler;
use crate::cli::ServerArgs;
use crate::pipeline::{AnalysisPipeline, PipelineConfig};
use crate::registry::HttpClient;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub handler: Arc<A2aHandler>,
}

impl AppState {
    /// Build state around an analysis pipeline
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        let handler = Arc::new(A2aHandler::new(pipeline.clone()));
        Self { pipeline, handler }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health_check))
        .route("/analyze/python", post(routes::analyze_python))
        .route("/analyze/npm", post(routes::analyze_npm))
        .route("/check-package", post(routes::check_package))
        .route("/a2a", post(routes::a2a_endpoint))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server until shutdown
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    let client = HttpClient::with_timeout_secs(args.timeout)
        .map_err(|e| anyhow::anyhow!("failed to create HTTP client: {}", e))?;
    let pipeline = Arc::new(AnalysisPipeline::new(
        client,
        PipelineConfig {
            concurrency: args.concurrency,
        },
    ));
    let state = AppState::new(pipeline);
    let app = create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
