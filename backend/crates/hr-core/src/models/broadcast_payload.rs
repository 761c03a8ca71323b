use crate::{NewWebhookEvent, Result as CoreResult};

use serde::{Deserialize, Serialize};

/// Live projection of a captured event. Headers and tenant are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastPayload {
    pub method: String,
    pub url: String,
    pub body: String,
}

impl BroadcastPayload {
    pub fn from_event(event: &NewWebhookEvent) -> Self {
        Self {
            method: event.method.clone(),
            url: event.url.clone(),
            body: String::from_utf8_lossy(&event.body).into_owned(),
        }
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
