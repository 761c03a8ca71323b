use crate::{AuthError, CredentialStore, Result as AuthResult};

use hr_core::{ErrorLocation, TenantId};

use std::panic::Location;
use std::sync::Arc;

/// Derives the tenant of a request, either from a credential (subscribers)
/// or from the first label of the host name (ingestion).
#[derive(Clone)]
pub struct TenantResolver {
    store: Arc<dyn CredentialStore>,
}

impl TenantResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    #[track_caller]
    pub fn resolve_from_credential(&self, credential: &str) -> AuthResult<TenantId> {
        if credential.is_empty() {
            return Err(AuthError::Unauthorized {
                message: "missing credential".into(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.store
            .tenant_for(credential)
            .ok_or_else(|| AuthError::Unauthorized {
                message: "unknown credential".into(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    pub fn resolve_from_address(&self, host: &str) -> AuthResult<TenantId> {
        let hostname = strip_port(host);
        let mut labels = hostname.split('.');
        let candidate = labels.next().unwrap_or_default();

        if labels.next().is_none() {
            return Err(invalid_tenant(host, "host has no subdomain"));
        }
        if candidate.is_empty() {
            return Err(invalid_tenant(host, "subdomain is empty"));
        }
        if !self.store.is_known_tenant(candidate) {
            return Err(invalid_tenant(host, "unknown tenant"));
        }

        TenantId::new(candidate).map_err(|e| invalid_tenant(host, &e.to_string()))
    }
}

#[track_caller]
fn invalid_tenant(host: &str, message: &str) -> AuthError {
    AuthError::InvalidTenant {
        host: host.to_string(),
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Remove a trailing `:port` from a host, handling bracketed IPv6 literals.
/// A bare IPv6 address (several colons, no brackets) is returned unchanged.
pub fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split_once(']').map_or(host, |(inner, _)| inner);
    }

    match host.rsplit_once(':') {
        Some((name, port))
            if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    }
}
