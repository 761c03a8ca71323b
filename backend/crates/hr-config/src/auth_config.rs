use crate::{ConfigError, ConfigErrorResult};

use std::collections::BTreeMap;

use serde::Deserialize;

/// Subscriber credentials.
///
/// ```toml
/// [auth.tokens]
/// token1 = "acme"
/// token2 = "beta"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// credential -> tenant
    pub tokens: BTreeMap<String, String>,
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (token, tenant) in &self.tokens {
            if token.trim().is_empty() {
                return Err(ConfigError::auth("auth.tokens contains an empty credential"));
            }
            if tenant.is_empty() || tenant.contains('.') {
                return Err(ConfigError::auth(format!(
                    "auth.tokens maps a credential to invalid tenant '{tenant}' (must be a single non-empty host label)"
                )));
            }
        }

        Ok(())
    }

    /// Parse `token=tenant` pairs separated by commas, as used by `HR_AUTH_TOKENS`.
    pub fn parse_token_list(list: &str) -> ConfigErrorResult<BTreeMap<String, String>> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .split_once('=')
                    .map(|(token, tenant)| (token.trim().to_string(), tenant.trim().to_string()))
                    .ok_or_else(|| {
                        ConfigError::auth(format!("expected token=tenant, got '{entry}'"))
                    })
            })
            .collect()
    }

    pub fn tenant_count(&self) -> usize {
        let mut tenants: Vec<&String> = self.tokens.values().collect();
        tenants.sort();
        tenants.dedup();
        tenants.len()
    }
}
