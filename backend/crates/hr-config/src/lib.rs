mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod range;
mod rate_limit_config;
mod server_config;
mod storage_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;
pub use websocket_config::WebSocketConfig;

const CONFIG_DIR_ENV: &str = "HR_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".hookrelay";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_INGEST_PORT: u16 = 8000;
const DEFAULT_RELAY_PORT: u16 = 9000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 10000;
const DEFAULT_MAX_CONNECTIONS_PER_TENANT: usize = 1000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100000;
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
const MIN_MAX_BODY_BYTES: usize = 1024;
const MAX_MAX_BODY_BYTES: usize = 256 * 1024 * 1024;

const DEFAULT_DATABASE_FILENAME: &str = "events.db";

const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5000;
const MIN_STORAGE_TIMEOUT_MS: u64 = 10;
const MAX_STORAGE_TIMEOUT_MS: u64 = 60000;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
