use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid tenant for host '{host}': {message} {location}")]
    InvalidTenant {
        host: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid credential table: {message} {location}")]
    InvalidCredentialTable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} requests per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code used in HTTP error bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidTenant { .. } => "INVALID_TENANT",
            Self::InvalidCredentialTable { .. } => "INVALID_CREDENTIALS",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
