use hr_auth::AuthError;
use hr_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failure of a single ingestion. Delivery problems never show up here.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid tenant: {source}")]
    InvalidTenant {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Storage failure: {message} {location}")]
    StorageFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("Serialization failed: {source} {location}")]
    Serialization {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl IngestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTenant { .. } => "INVALID_TENANT",
            Self::StorageFailure { .. } => "STORAGE_FAILURE",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }

    #[track_caller]
    pub(crate) fn storage(message: impl Into<String>) -> Self {
        Self::StorageFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AuthError> for IngestError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::InvalidTenant {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for IngestError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
