use crate::{
    ConnectionConfig, ConnectionInfo, ConnectionRegistry, IngestPipeline, Metrics, RemoteAddr,
    ShutdownCoordinator, WebSocketConnection,
};

use hr_auth::{RateLimiterFactory, TenantResolver, extract_credential};
use hr_core::TenantId;
use hr_db::EventStore;

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::Response,
};
use log::{debug, error, warn};
use serde::Deserialize;

/// Shared state for both listeners
#[derive(Clone)]
pub struct AppState {
    pub resolver: TenantResolver,
    pub rate_limiter_factory: RateLimiterFactory,
    pub registry: ConnectionRegistry,
    pub pipeline: IngestPipeline,
    pub store: Arc<dyn EventStore>,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscribeQuery {
    pub token: Option<String>,
}

/// Subscription upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SubscribeQuery>,
    RemoteAddr(remote_addr): RemoteAddr,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let tenant = authorize(&state, &headers, query.token.as_deref())?;
    debug!("Subscription upgrade for tenant {tenant}");

    let info = ConnectionInfo::new(tenant, remote_addr);
    let rate_limiter = state.rate_limiter_factory.create();

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, info, state, rate_limiter)))
}

/// Handle the socket after upgrade; registration happens inside the session
async fn handle_socket(
    socket: WebSocket,
    info: ConnectionInfo,
    state: AppState,
    rate_limiter: hr_auth::ConnectionRateLimiter,
) {
    let connection_id = info.connection_id;
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        info,
        state.config,
        state.metrics.clone(),
        rate_limiter,
        state.registry.clone(),
    );

    if let Err(e) = connection.handle(socket, shutdown_guard).await {
        error!("Connection {connection_id} ended: {e}");
    }
}

/// Resolve the subscriber's tenant from the Authorization header or `?token=`
fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    query_token: Option<&str>,
) -> Result<TenantId, StatusCode> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let credential = extract_credential(authorization, query_token).ok_or_else(|| {
        warn!("Subscription rejected: no credential");
        state.metrics.connection_rejected("unauthorized");
        StatusCode::UNAUTHORIZED
    })?;

    state.resolver.resolve_from_credential(credential).map_err(|e| {
        warn!("Subscription rejected: {e}");
        state.metrics.connection_rejected("unauthorized");
        StatusCode::UNAUTHORIZED
    })
}
