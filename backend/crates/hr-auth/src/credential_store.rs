use crate::{AuthError, Result as AuthResult};

use hr_core::{ErrorLocation, TenantId};

use std::collections::{HashMap, HashSet};
use std::panic::Location;

/// Lookup capability mapping a presented credential to its tenant.
///
/// Read-only from the relay's point of view; implementations may be backed
/// by configuration, a database or a remote service.
pub trait CredentialStore: Send + Sync {
    /// Tenant owning `credential`, if any
    fn tenant_for(&self, credential: &str) -> Option<TenantId>;

    /// Whether `candidate` names a registered tenant
    fn is_known_tenant(&self, candidate: &str) -> bool;
}

/// Fixed credential table, usually loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    tokens: HashMap<String, TenantId>,
    tenants: HashSet<TenantId>,
}

impl StaticCredentialStore {
    /// Build from `credential -> tenant` pairs.
    #[track_caller]
    pub fn new<I, C, T>(entries: I) -> AuthResult<Self>
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: Into<String>,
    {
        let mut store = Self::default();

        for (credential, tenant) in entries {
            let credential = credential.into();
            if credential.is_empty() {
                return Err(AuthError::InvalidCredentialTable {
                    message: "credential cannot be empty".into(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            let tenant =
                TenantId::new(tenant).map_err(|e| AuthError::InvalidCredentialTable {
                    message: format!("credential maps to an invalid tenant: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            store.tenants.insert(tenant.clone());
            store.tokens.insert(credential, tenant);
        }

        log::debug!(
            "Credential table loaded: {} credentials, {} tenants",
            store.tokens.len(),
            store.tenants.len()
        );

        Ok(store)
    }

    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn tenant_for(&self, credential: &str) -> Option<TenantId> {
        self.tokens.get(credential).cloned()
    }

    fn is_known_tenant(&self, candidate: &str) -> bool {
        self.tenants.contains(candidate)
    }
}
