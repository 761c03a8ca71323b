use hr_auth::AuthError;
use hr_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Connection limit exceeded for {scope}: {current} connections (max: {max}) {location}")]
    ConnectionLimitExceeded {
        scope: String,
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Heartbeat timeout after {timeout_secs}s {location}")]
    HeartbeatTimeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Evicted: {reason} {location}")]
    Evicted {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Rate limited: {source} {location}")]
    RateLimited {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Payload serialization failed: {source} {location}")]
    Serialization {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl WsError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::ConnectionLimitExceeded { .. } => "CONNECTION_LIMIT",
            Self::HeartbeatTimeout { .. } => "HEARTBEAT_TIMEOUT",
            Self::Evicted { .. } => "EVICTED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<CoreError> for WsError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
