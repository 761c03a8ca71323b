//! Tenant-scoped event query handlers

use crate::{ApiResult, AuthenticatedTenant};

use hr_core::WebhookEvent;
use hr_ws::AppState;

use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EventDto {
    pub id: i64,
    pub method: String,
    pub url: String,
    pub headers: serde_json::Value,
    pub body: String,
    pub captured_at: String,
}

impl From<WebhookEvent> for EventDto {
    fn from(event: WebhookEvent) -> Self {
        let headers = serde_json::from_str(&event.headers)
            .unwrap_or_else(|_| serde_json::Value::String(event.headers.clone()));

        Self {
            id: event.id,
            body: event.body_text(),
            method: event.method,
            url: event.url,
            headers,
            captured_at: event.captured_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub tenant: String,
    pub events: Vec<EventDto>,
}

#[derive(Debug, Serialize)]
pub struct ClearEventsResponse {
    pub deleted: u64,
}

/// GET /user/events
pub async fn list_events(
    State(state): State<AppState>,
    AuthenticatedTenant(tenant): AuthenticatedTenant,
) -> ApiResult<Json<EventListResponse>> {
    let events = state.store.find_by_tenant(&tenant).await?;

    Ok(Json(EventListResponse {
        tenant: tenant.to_string(),
        events: events.into_iter().map(EventDto::from).collect(),
    }))
}

/// POST /user/clear, DELETE /user/events
pub async fn clear_events(
    State(state): State<AppState>,
    AuthenticatedTenant(tenant): AuthenticatedTenant,
) -> ApiResult<Json<ClearEventsResponse>> {
    let deleted = state.store.delete_by_tenant(&tenant).await?;
    log::info!("Cleared {deleted} events for tenant {tenant}");

    Ok(Json(ClearEventsResponse { deleted }))
}
