//! Catch-all capture endpoint

use crate::ApiResult;

use hr_core::HeaderSet;
use hr_ws::{AppState, CapturedRequest};

use axum::{
    Json,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, Method, Uri, header},
};
use bytes::Bytes;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub logged: bool,
    /// Live subscribers the event was handed to
    pub forwarded: usize,
    pub tenant: String,
    pub event_id: i64,
}

/// ANY /* - capture the request for the tenant named by the Host subdomain
pub async fn capture(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<IngestResponse>> {
    // Over-limit bodies get the JSON error shape instead of axum's plain text
    let body = body?;

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or_default()
        .to_string();

    let url = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());

    let header_set: HeaderSet = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let ack = state
        .pipeline
        .ingest(CapturedRequest {
            host,
            method: method.to_string(),
            url,
            headers: header_set,
            body: body.to_vec(),
        })
        .await?;

    Ok(Json(IngestResponse {
        logged: true,
        forwarded: ack.delivered,
        tenant: ack.tenant.to_string(),
        event_id: ack.event_id,
    }))
}
