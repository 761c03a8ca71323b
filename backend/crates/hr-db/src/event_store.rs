use crate::Result as DbErrorResult;

use hr_core::{NewWebhookEvent, TenantId, WebhookEvent};

use async_trait::async_trait;

/// Durable storage for captured webhook events.
///
/// Implementations must be safe to share across request handlers. Every
/// query is scoped to a single tenant.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a captured event and return it with its assigned id.
    async fn create(&self, event: &NewWebhookEvent) -> DbErrorResult<WebhookEvent>;

    /// All events for `tenant`, oldest first.
    async fn find_by_tenant(&self, tenant: &TenantId) -> DbErrorResult<Vec<WebhookEvent>>;

    /// Delete every event for `tenant`, returning how many were removed.
    async fn delete_by_tenant(&self, tenant: &TenantId) -> DbErrorResult<u64>;
}
