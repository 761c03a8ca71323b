pub mod connection_rate_limiter;
pub mod credential;
pub mod credential_store;
pub mod error;
pub mod rate_limit_config;
pub mod rate_limiter_factory;
pub mod tenant_resolver;

pub use connection_rate_limiter::ConnectionRateLimiter;
pub use credential::extract_credential;
pub use credential_store::{CredentialStore, StaticCredentialStore};
pub use error::{AuthError, Result};
pub use rate_limit_config::RateLimitConfig;
pub use rate_limiter_factory::RateLimiterFactory;
pub use tenant_resolver::{TenantResolver, strip_port};

#[cfg(test)]
mod tests;
