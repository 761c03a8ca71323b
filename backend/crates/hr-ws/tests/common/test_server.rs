#![allow(dead_code)]

use hr_auth::{RateLimitConfig, RateLimiterFactory, StaticCredentialStore, TenantResolver};
use hr_core::{HeaderSet, TenantId};
use hr_db::{EventStore, WebhookEventRepository};
use hr_ws::{
    AppState, CapturedRequest, ConnectionConfig, ConnectionLimits, ConnectionRegistry,
    IngestAck, IngestPipeline, Metrics, ShutdownCoordinator,
};

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const ACME_TOKEN: &str = "token1";
pub const ACME_TOKEN_2: &str = "token1b";
pub const BETA_TOKEN: &str = "token2";

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub max_connections_total: usize,
    pub max_connections_per_tenant: usize,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    pub echo_client_frames: bool,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            max_connections_total: 100,
            max_connections_per_tenant: 100,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 60,
            echo_client_frames: false,
        }
    }
}

impl TestServerConfig {
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections_total: 2,
            max_connections_per_tenant: 2,
            ..Default::default()
        }
    }

    pub fn with_strict_rate_limits() -> Self {
        Self {
            rate_limit_max_requests: 3,
            rate_limit_window_secs: 60,
            ..Default::default()
        }
    }

    pub fn with_echo() -> Self {
        Self {
            echo_client_frames: true,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

impl TestServerWithState {
    /// Registration completes after the upgrade; wait for it before broadcasting.
    pub async fn wait_for_subscribers(&self, tenant: &str, expected: usize) {
        let tenant = TenantId::new(tenant).unwrap();
        for _ in 0..100 {
            if self.app_state.registry.connection_count(&tenant).await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("tenant {tenant} never reached {expected} subscribers");
    }

    /// Capture a POST addressed to `tenant`'s subdomain
    pub async fn ingest(&self, tenant: &str, path: &str, body: &str) -> IngestAck {
        let request = CapturedRequest {
            host: format!("{tenant}.hooks.test:8000"),
            method: "POST".into(),
            url: path.into(),
            headers: HeaderSet::new(),
            body: body.as_bytes().to_vec(),
        };
        self.app_state
            .pipeline
            .ingest(request)
            .await
            .expect("ingest failed")
    }
}

pub async fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default()).await
}

pub async fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config).await;
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

async fn create_app(config: TestServerConfig) -> (Router, AppState) {
    let credentials = StaticCredentialStore::new([
        (ACME_TOKEN, "acme"),
        (ACME_TOKEN_2, "acme"),
        (BETA_TOKEN, "beta"),
    ])
    .unwrap();
    let resolver = TenantResolver::new(Arc::new(credentials));

    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");
    hr_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    let store: Arc<dyn EventStore> = Arc::new(WebhookEventRepository::new(pool));

    let metrics = Metrics::default();
    let registry = ConnectionRegistry::new(
        ConnectionLimits {
            max_total: config.max_connections_total,
            max_per_tenant: config.max_connections_per_tenant,
        },
        metrics.clone(),
    );

    let pipeline = IngestPipeline::new(
        resolver.clone(),
        Arc::clone(&store),
        registry.clone(),
        metrics.clone(),
        Duration::from_secs(5),
    );

    let app_state = AppState {
        resolver,
        rate_limiter_factory: RateLimiterFactory::new(RateLimitConfig {
            max_requests: config.rate_limit_max_requests,
            window_secs: config.rate_limit_window_secs,
        }),
        registry,
        pipeline,
        store,
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig {
            echo_client_frames: config.echo_client_frames,
            ..Default::default()
        },
    };

    let router = Router::new()
        .route("/events", get(hr_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
