pub mod broadcast_payload;
pub mod header_set;
pub mod tenant_id;
pub mod webhook_event;
