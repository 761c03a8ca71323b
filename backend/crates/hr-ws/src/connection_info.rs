use crate::ConnectionId;

use hr_core::TenantId;

use std::net::SocketAddr;

use chrono::{DateTime, Utc};

/// Information about an active subscriber
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub tenant_id: TenantId,
    /// Peer address, for diagnostics only
    pub remote_addr: Option<SocketAddr>,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionInfo {
    pub fn new(tenant_id: TenantId, remote_addr: Option<SocketAddr>) -> Self {
        Self {
            connection_id: ConnectionId::new(),
            tenant_id,
            remote_addr,
            connected_at: Utc::now(),
        }
    }
}
