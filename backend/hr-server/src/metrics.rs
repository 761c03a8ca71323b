//! Prometheus scrape endpoint for the relay listener.

use crate::error::{Result as ServerErrorResult, ServerError};

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

impl MetricsState {
    /// Install the process-wide Prometheus recorder. Call once.
    pub fn install() -> ServerErrorResult<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| ServerError::Metrics {
                message: format!("Failed to install metrics recorder: {e}"),
            })?;

        Ok(Self { handle })
    }
}

pub fn metrics_routes(state: Arc<MetricsState>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn metrics_handler(State(state): State<Arc<MetricsState>>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
        .into_response()
}
