use hr_server::error::ServerError;
use hr_server::metrics::MetricsState;
use hr_server::{build_app_state, build_ingest_router, build_relay_router, logger};

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = hr_config::Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting hr-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5)),
        )
        .await?;

    info!("Running database migrations...");
    hr_db::MIGRATOR
        .run(&pool)
        .await
        .map_err(hr_db::DbError::from)?;
    info!("Migrations complete");

    let metrics = match MetricsState::install() {
        Ok(metrics) => Some(Arc::new(metrics)),
        Err(e) => {
            warn!("{e}; /metrics disabled");
            None
        }
    };

    let app_state = build_app_state(&config, pool)?;
    let shutdown = app_state.shutdown.clone();

    let ingest_app = build_ingest_router(app_state.clone(), config.server.max_body_bytes);
    let relay_app = build_relay_router(app_state, metrics);

    let ingest_listener = bind(&config.server.ingest_addr()).await?;
    let relay_listener = bind(&config.server.relay_addr()).await?;
    info!("Ingest listening on {}", ingest_listener.local_addr()?);
    info!("Relay listening on {}", relay_listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {e}");
            }
        }
    });

    let mut ingest_guard = shutdown.subscribe_guard();
    let ingest = axum::serve(ingest_listener, ingest_app)
        .with_graceful_shutdown(async move { ingest_guard.wait().await });

    let mut relay_guard = shutdown.subscribe_guard();
    let relay = axum::serve(
        relay_listener,
        relay_app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { relay_guard.wait().await });

    info!("Server ready to accept connections");
    let (ingest_result, relay_result) = tokio::join!(ingest, relay);
    ingest_result?;
    relay_result?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })
}
