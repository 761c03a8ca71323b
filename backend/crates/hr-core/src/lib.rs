pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::broadcast_payload::BroadcastPayload;
pub use models::header_set::HeaderSet;
pub use models::tenant_id::TenantId;
pub use models::webhook_event::{NewWebhookEvent, WebhookEvent};
