pub mod app_state;
pub mod connection_config;
pub mod connection_handle;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod error;
pub mod ingest_error;
pub mod ingest_pipeline;
pub mod metrics;
pub mod remote_addr;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use connection_config::ConnectionConfig;
pub use connection_handle::{ConnectionHandle, DeliveryFailure};
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use error::{Result, WsError};
pub use ingest_error::IngestError;
pub use ingest_pipeline::{CapturedRequest, IngestAck, IngestPipeline};
pub use metrics::Metrics;
pub use remote_addr::RemoteAddr;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;
