//! HTTP error types
//!
//! Every failure leaves the ingest listener as the same JSON shape:
//! `{"error":{"code":"...","message":"..."}}`.

use hr_auth::AuthError;
use hr_db::DbError;
use hr_ws::IngestError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "UNAUTHORIZED", "INVALID_TENANT")
    pub code: String,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unknown credential (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Host does not name a known tenant (400)
    #[error("Invalid tenant: {message} {location}")]
    InvalidTenant {
        message: String,
        location: ErrorLocation,
    },

    /// Request body could not be read (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Body exceeds `server.max_body_bytes` (413)
    #[error("Payload too large: {message} {location}")]
    PayloadTooLarge {
        message: String,
        location: ErrorLocation,
    },

    /// Event store failed or timed out (500)
    #[error("Storage failure: {message} {location}")]
    StorageFailure {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidTenant { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::StorageFailure { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidTenant { .. } => "INVALID_TENANT",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::StorageFailure { .. } => "STORAGE_FAILURE",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::warn!("{self}");
        }

        let code = self.error_code().to_string();
        let message = match self {
            Self::Unauthorized { message, .. }
            | Self::InvalidTenant { message, .. }
            | Self::BadRequest { message, .. }
            | Self::PayloadTooLarge { message, .. }
            | Self::StorageFailure { message, .. }
            | Self::Internal { message, .. } => message,
        };

        (
            status,
            Json(ApiErrorResponse {
                error: ApiErrorBody { code, message },
            }),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            AuthError::Unauthorized { message, .. } => ApiError::Unauthorized { message, location },
            AuthError::InvalidTenant { host, message, .. } => ApiError::InvalidTenant {
                message: format!("{host}: {message}"),
                location,
            },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<IngestError> for ApiError {
    #[track_caller]
    fn from(e: IngestError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            IngestError::InvalidTenant { source, .. } => match source {
                AuthError::InvalidTenant { host, message, .. } => ApiError::InvalidTenant {
                    message: format!("{host}: {message}"),
                    location,
                },
                other => ApiError::InvalidTenant {
                    message: other.to_string(),
                    location,
                },
            },
            // Don't expose store internals to callers
            IngestError::StorageFailure { .. } => ApiError::StorageFailure {
                message: "Failed to store event".into(),
                location,
            },
            IngestError::Serialization { .. } => ApiError::Internal {
                message: "Failed to encode event".into(),
                location,
            },
        }
    }
}

impl From<BytesRejection> for ApiError {
    #[track_caller]
    fn from(rejection: BytesRejection) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge { message, location }
        } else {
            ApiError::BadRequest { message, location }
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Database error: {e}");
        ApiError::StorageFailure {
            message: "Database operation failed".into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
