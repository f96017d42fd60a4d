//! HTTP inference service.
//!
//! A thin axum shell over the scorer: artifacts are loaded once at startup
//! into shared immutable state, every request is an independent read, and a
//! failed artifact load leaves the service running in a degraded mode that
//! answers 503 instead of crashing per-request.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::features::extractor::UrlFeatureExtractor;
use crate::scorer::Scorer;

/// Shared state for request handlers.
///
/// `scorer` is `None` when artifact loading failed at startup; prediction
/// endpoints then answer 503 while `/health` reports the degraded state.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Option<Arc<Scorer>>,
    pub extractor: Arc<UrlFeatureExtractor>,
}

impl AppState {
    /// Build state from an optional scorer and the default extractor.
    pub fn new(scorer: Option<Scorer>) -> Self {
        Self {
            scorer: scorer.map(Arc::new),
            extractor: Arc::new(UrlFeatureExtractor::new()),
        }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::console))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/predict/features", post(handlers::predict_features))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("phishguard service listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
