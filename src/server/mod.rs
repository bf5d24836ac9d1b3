//! HTTP surface
//!
//! axum router over an [`AssessmentPipeline`]. Validation happens here, before the
//! pipeline runs; every failure leaves as the `{ success: false, error }` envelope.

pub mod handlers;
pub mod request;
pub mod response;

use crate::config::Config;
use crate::errors::{Result, ScreenError};
use crate::pipeline::AssessmentPipeline;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Request body ceiling
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AssessmentPipeline>,
    pub started: Instant,
}

impl AppState {
    pub fn new(pipeline: AssessmentPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            started: Instant::now(),
        }
    }
}

/// CORS policy for a single allowed origin
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .map_err(|_| ScreenError::ConfigError(format!("invalid CORS origin: {}", origin)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Build the application router
pub fn router(state: AppState, cors_origin: &str) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/api/v1/assessment", get(handlers::info))
        .route("/api/v1/assessment/analyze", post(handlers::analyze))
        .route("/api/v1/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors_layer(cors_origin)?)
        .with_state(state))
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let pipeline = AssessmentPipeline::from_config(config)?;
    let app = router(AppState::new(pipeline), &config.server.cors_origin)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %addr,
        extractor = %config.extractor.url,
        assessor = %config.assessor.url,
        "screening API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
