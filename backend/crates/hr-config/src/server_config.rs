use crate::range::ensure_in_range;
use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_INGEST_PORT, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_CONNECTIONS_PER_TENANT, DEFAULT_RELAY_PORT,
    MAX_MAX_BODY_BYTES, MAX_MAX_CONNECTIONS, MIN_MAX_BODY_BYTES, MIN_MAX_CONNECTIONS, MIN_PORT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Webhook capture and event query listener
    pub ingest_port: u16,
    /// Subscriber WebSocket and health listener
    pub relay_port: u16,
    /// Maximum concurrent subscribers across all tenants
    pub max_connections: usize,
    /// Maximum concurrent subscribers for one tenant
    pub max_connections_per_tenant: usize,
    /// Largest webhook body the ingest listener accepts, in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            ingest_port: DEFAULT_INGEST_PORT,
            relay_port: DEFAULT_RELAY_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_connections_per_tenant: DEFAULT_MAX_CONNECTIONS_PER_TENANT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, port) in [
            ("ingest_port", self.ingest_port),
            ("relay_port", self.relay_port),
        ] {
            // Port 0 means "auto-assign"
            if port != 0 && port < MIN_PORT {
                return Err(ConfigError::server(format!(
                    "server.{name} must be 0 (auto) or >= {MIN_PORT}, got {port}"
                )));
            }
        }

        if self.ingest_port != 0 && self.ingest_port == self.relay_port {
            return Err(ConfigError::server(format!(
                "server.ingest_port and server.relay_port must differ, both are {}",
                self.ingest_port
            )));
        }

        ensure_in_range(
            "server.max_connections",
            self.max_connections,
            MIN_MAX_CONNECTIONS..=MAX_MAX_CONNECTIONS,
        )?;
        // The per-tenant cap can never exceed the server-wide one
        ensure_in_range(
            "server.max_connections_per_tenant",
            self.max_connections_per_tenant,
            MIN_MAX_CONNECTIONS..=self.max_connections,
        )?;
        ensure_in_range(
            "server.max_body_bytes",
            self.max_body_bytes,
            MIN_MAX_BODY_BYTES..=MAX_MAX_BODY_BYTES,
        )?;

        Ok(())
    }

    pub fn ingest_addr(&self) -> String {
        format!("{}:{}", self.host, self.ingest_port)
    }

    pub fn relay_addr(&self) -> String {
        format!("{}:{}", self.host, self.relay_port)
    }
}
