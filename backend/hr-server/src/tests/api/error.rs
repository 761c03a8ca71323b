use crate::ApiError;

use hr_auth::AuthError;
use hr_ws::IngestError;

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_unauthorized_error_when_rendered_then_401_with_json_body() {
    let error = ApiError::Unauthorized {
        message: "missing Authorization header".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["error"]["message"], "missing Authorization header");
}

#[tokio::test]
async fn given_storage_failure_when_rendered_then_500() {
    let error = ApiError::StorageFailure {
        message: "Failed to store event".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"]["code"], "STORAGE_FAILURE");
}

#[test]
fn given_invalid_tenant_auth_error_when_converted_then_bad_request() {
    let error: ApiError = AuthError::InvalidTenant {
        host: "localhost".into(),
        message: "no tenant subdomain".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error.error_code(), "INVALID_TENANT");
}

#[test]
fn given_unknown_credential_when_converted_then_unauthorized() {
    let error: ApiError = AuthError::Unauthorized {
        message: "unknown credential".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_ingest_storage_failure_when_converted_then_details_hidden() {
    let error: ApiError = IngestError::StorageFailure {
        message: "disk I/O error at /var/lib/hookrelay/events.db".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    let message = json["error"]["message"].as_str().unwrap();
    assert!(!message.contains("events.db"));
}

#[tokio::test]
async fn given_payload_too_large_when_rendered_then_413() {
    let error = ApiError::PayloadTooLarge {
        message: "length limit exceeded".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
}
