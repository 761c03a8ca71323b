use crate::TenantId;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A captured inbound request, as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookEvent {
    pub id: i64,
    pub tenant_id: TenantId,

    pub method: String,
    /// Path plus query string
    pub url: String,
    /// JSON object of header name to values
    pub headers: String,
    pub body: Vec<u8>,

    pub captured_at: DateTime<Utc>,
}

impl WebhookEvent {
    /// Body rendered as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// An event that has been captured but not yet assigned an id by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWebhookEvent {
    pub tenant_id: TenantId,
    pub method: String,
    pub url: String,
    pub headers: String,
    pub body: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl NewWebhookEvent {
    pub fn new(
        tenant_id: TenantId,
        method: impl Into<String>,
        url: impl Into<String>,
        headers: String,
        body: Vec<u8>,
    ) -> Self {
        Self {
            tenant_id,
            method: method.into(),
            url: url.into(),
            headers,
            body,
            captured_at: Utc::now(),
        }
    }

    pub fn into_stored(self, id: i64) -> WebhookEvent {
        WebhookEvent {
            id,
            tenant_id: self.tenant_id,
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            captured_at: self.captured_at,
        }
    }
}
