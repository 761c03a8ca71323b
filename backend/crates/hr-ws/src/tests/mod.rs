
use crate::{ConnectionHandle, ConnectionInfo, ConnectionLimits, ConnectionRegistry, Metrics};

use hr_auth::{StaticCredentialStore, TenantResolver};
use hr_core::TenantId;

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::{Notify, mpsc};

pub(crate) fn tenant(name: &str) -> TenantId {
    TenantId::new(name).unwrap()
}

pub(crate) fn create_registry(max_total: usize, max_per_tenant: usize) -> ConnectionRegistry {
    ConnectionRegistry::new(
        ConnectionLimits {
            max_per_tenant,
            max_total,
        },
        Metrics::default(),
    )
}

/// A subscriber without a socket: the test owns the receiving end of its queue.
pub(crate) struct FakeSubscriber {
    pub handle: ConnectionHandle,
    pub rx: mpsc::Receiver<Message>,
    pub close: Arc<Notify>,
}

pub(crate) fn create_subscriber(tenant_name: &str, capacity: usize) -> FakeSubscriber {
    let (tx, rx) = mpsc::channel(capacity);
    let close = Arc::new(Notify::new());
    let handle = ConnectionHandle::new(
        ConnectionInfo::new(tenant(tenant_name), None),
        tx,
        Arc::clone(&close),
    );

    FakeSubscriber { handle, rx, close }
}

pub(crate) fn create_resolver(entries: &[(&str, &str)]) -> TenantResolver {
    let store = StaticCredentialStore::new(entries.iter().copied()).unwrap();
    TenantResolver::new(Arc::new(store))
}
