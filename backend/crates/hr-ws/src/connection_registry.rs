use crate::{
    ConnectionHandle, ConnectionId, ConnectionLimits, Metrics, Result as WsErrorResult, WsError,
};

use hr_core::{BroadcastPayload, TenantId};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::Message;
use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::sync::RwLock;

/// Live subscribers, partitioned by tenant.
///
/// The lock is only ever held for map bookkeeping. Delivery works on a
/// snapshot taken under the read lock so a slow subscriber cannot stall
/// registration, removal or other tenants' broadcasts.
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
    metrics: Metrics,
}

#[derive(Default)]
struct RegistryInner {
    /// Never holds an empty bucket
    tenants: HashMap<TenantId, HashMap<ConnectionId, ConnectionHandle>>,
    total: usize,
}

impl RegistryInner {
    fn remove(&mut self, tenant: &TenantId, connection_id: ConnectionId) -> bool {
        let Some(bucket) = self.tenants.get_mut(tenant) else {
            return false;
        };

        let removed = bucket.remove(&connection_id).is_some();
        if bucket.is_empty() {
            self.tenants.remove(tenant);
        }
        if removed {
            self.total -= 1;
        }

        removed
    }
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits, metrics: Metrics) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
            limits,
            metrics,
        }
    }

    /// Add a subscriber under its tenant, enforcing both connection limits.
    pub async fn register(&self, handle: ConnectionHandle) -> WsErrorResult<ConnectionId> {
        let mut inner = self.inner.write().await;

        if inner.total >= self.limits.max_total {
            warn!(
                "Total connection limit reached: {}/{}",
                inner.total, self.limits.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                scope: "server".into(),
                current: inner.total,
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let tenant = handle.tenant_id().clone();
        let tenant_current = inner.tenants.get(&tenant).map_or(0, HashMap::len);
        if tenant_current >= self.limits.max_per_tenant {
            warn!(
                "Connection limit reached for tenant {tenant}: {tenant_current}/{}",
                self.limits.max_per_tenant
            );
            return Err(WsError::ConnectionLimitExceeded {
                scope: format!("tenant {tenant}"),
                current: tenant_current,
                max: self.limits.max_per_tenant,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let connection_id = handle.id();
        inner
            .tenants
            .entry(tenant.clone())
            .or_default()
            .insert(connection_id, handle);
        inner.total += 1;
        self.metrics.connection_established();

        info!(
            "Registered connection {connection_id} for tenant {tenant} ({} total)",
            inner.total
        );

        Ok(connection_id)
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub async fn unregister(&self, tenant: &TenantId, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;

        if inner.remove(tenant, connection_id) {
            info!(
                "Unregistered connection {connection_id} for tenant {tenant} ({} total remaining)",
                inner.total
            );
        }
    }

    /// Serialize `payload` once and fan it out to every subscriber of `tenant`.
    pub async fn broadcast(
        &self,
        tenant: &TenantId,
        payload: &BroadcastPayload,
    ) -> WsErrorResult<usize> {
        let text = payload.to_json()?;
        Ok(self.broadcast_message(tenant, Message::Text(text.into())).await)
    }

    /// Deliver `message` to the tenant's current subscribers without waiting
    /// on any of them. Subscribers whose queue is full or closed are told to
    /// close and are removed before this returns.
    ///
    /// Returns the number of subscribers the message was enqueued for.
    pub async fn broadcast_message(&self, tenant: &TenantId, message: Message) -> usize {
        let snapshot: Vec<ConnectionHandle> = {
            let inner = self.inner.read().await;
            match inner.tenants.get(tenant) {
                Some(bucket) => bucket.values().cloned().collect(),
                None => Vec::new(),
            }
        };

        if snapshot.is_empty() {
            debug!("No subscribers for tenant {tenant}, nothing to broadcast");
            self.metrics.broadcast_published(0);
            return 0;
        }

        let mut delivered = 0;
        let mut failed = Vec::new();

        for handle in snapshot {
            match handle.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(reason) => {
                    let info = handle.info();
                    warn!(
                        "Delivery to connection {} (tenant {tenant}, peer {}, connected {}) failed: {reason}, evicting",
                        info.connection_id,
                        info
                            .remote_addr
                            .map_or_else(|| "unknown".to_string(), |addr| addr.to_string()),
                        info.connected_at.to_rfc3339()
                    );
                    self.metrics.delivery_failed(reason.as_str());
                    handle.close();
                    failed.push(handle.id());
                }
            }
        }

        if !failed.is_empty() {
            let mut inner = self.inner.write().await;
            for connection_id in failed {
                inner.remove(tenant, connection_id);
            }
        }

        self.metrics.broadcast_published(delivered);
        debug!("Broadcast to tenant {tenant} reached {delivered} subscribers");

        delivered
    }

    pub async fn contains(&self, tenant: &TenantId, connection_id: ConnectionId) -> bool {
        let inner = self.inner.read().await;
        inner
            .tenants
            .get(tenant)
            .is_some_and(|bucket| bucket.contains_key(&connection_id))
    }

    /// Number of subscribers for one tenant
    pub async fn connection_count(&self, tenant: &TenantId) -> usize {
        let inner = self.inner.read().await;
        inner.tenants.get(tenant).map_or(0, HashMap::len)
    }

    /// Number of tenants with at least one subscriber
    pub async fn tenant_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.tenants.len()
    }

    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.total
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
