use crate::{
    api::events::{clear_events, list_events},
    api::ingest::capture,
    health,
    metrics::{MetricsState, metrics_routes},
};

use hr_ws::AppState;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Webhook capture and event query listener.
///
/// Every path not claimed by the query API is a capture target, whatever the
/// method. CORS covers the query API only; on the capture fallback it would
/// answer preflight-shaped `OPTIONS` webhooks before they are stored.
pub fn build_ingest_router(state: AppState, max_body_bytes: usize) -> Router {
    let query_api = Router::new()
        .route("/user/events", get(list_events).delete(clear_events))
        .route("/user/clear", post(clear_events))
        .layer(cors());

    Router::new()
        .merge(query_api)
        .fallback(capture)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Subscriber WebSocket, health checks and (when installed) Prometheus scrape.
pub fn build_relay_router(state: AppState, metrics: Option<Arc<MetricsState>>) -> Router {
    let router = Router::new()
        .route("/events", get(hr_ws::handler))
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state);

    let router = match metrics {
        Some(metrics) => router.merge(metrics_routes(metrics)),
        None => router,
    };

    router.layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
