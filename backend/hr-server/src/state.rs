use crate::error::Result as ServerErrorResult;

use hr_auth::{RateLimitConfig, RateLimiterFactory, StaticCredentialStore, TenantResolver};
use hr_config::Config;
use hr_db::{EventStore, WebhookEventRepository};
use hr_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, IngestPipeline, Metrics,
    ShutdownCoordinator,
};

use std::sync::Arc;

use log::info;
use sqlx::SqlitePool;

/// Wire configuration and the database pool into the shared state both
/// listeners run on.
pub fn build_app_state(config: &Config, pool: SqlitePool) -> ServerErrorResult<AppState> {
    let credentials = StaticCredentialStore::new(
        config
            .auth
            .tokens
            .iter()
            .map(|(token, tenant)| (token.as_str(), tenant.as_str())),
    )?;
    info!(
        "Credential table ready: {} tenants",
        credentials.tenant_count()
    );
    let resolver = TenantResolver::new(Arc::new(credentials));

    let store: Arc<dyn EventStore> = Arc::new(WebhookEventRepository::new(pool));

    let metrics = Metrics::new();
    let registry = ConnectionRegistry::new(ConnectionLimits::from(&config.server), metrics.clone());

    let pipeline = IngestPipeline::new(
        resolver.clone(),
        Arc::clone(&store),
        registry.clone(),
        metrics.clone(),
        config.storage.timeout(),
    );

    // Convert config types for hr-auth
    let rate_limiter_factory = RateLimiterFactory::new(RateLimitConfig {
        max_requests: config.rate_limit.max_requests,
        window_secs: config.rate_limit.window_secs,
    });

    Ok(AppState {
        resolver,
        rate_limiter_factory,
        registry,
        pipeline,
        store,
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::from(&config.websocket),
    })
}
