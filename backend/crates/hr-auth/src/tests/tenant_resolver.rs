use crate::{AuthError, CredentialStore, StaticCredentialStore, TenantResolver, strip_port};

use std::sync::Arc;

use googletest::prelude::*;
use proptest::prelude::*;

fn resolver() -> TenantResolver {
    let store = StaticCredentialStore::new([("token1", "acme"), ("token2", "beta")]).unwrap();
    TenantResolver::new(Arc::new(store))
}

// =========================================================================
// Credential path
// =========================================================================

#[test]
fn given_known_credential_when_resolved_then_owning_tenant() {
    let tenant = resolver().resolve_from_credential("token2").unwrap();

    assert_that!(tenant.as_str(), eq("beta"));
}

#[test]
fn given_unknown_credential_when_resolved_then_unauthorized() {
    let result = resolver().resolve_from_credential("nope");

    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn given_empty_credential_when_resolved_then_unauthorized() {
    let result = resolver().resolve_from_credential("");

    assert!(matches!(result, Err(AuthError::Unauthorized { .. })));
}

#[test]
fn given_empty_tenant_in_table_when_building_store_then_error() {
    let result = StaticCredentialStore::new([("token1", "")]);

    assert!(matches!(
        result,
        Err(AuthError::InvalidCredentialTable { .. })
    ));
}

// =========================================================================
// Address path
// =========================================================================

#[test]
fn given_subdomain_with_port_when_resolved_then_first_label() {
    let tenant = resolver()
        .resolve_from_address("acme.hooks.example.com:8000")
        .unwrap();

    assert_that!(tenant.as_str(), eq("acme"));
}

#[test]
fn given_single_label_host_when_resolved_then_invalid_tenant() {
    let result = resolver().resolve_from_address("localhost:8000");

    assert!(matches!(result, Err(AuthError::InvalidTenant { .. })));
}

#[test]
fn given_unknown_subdomain_when_resolved_then_invalid_tenant() {
    let result = resolver().resolve_from_address("gamma.localhost");

    assert!(matches!(result, Err(AuthError::InvalidTenant { .. })));
}

#[test]
fn given_leading_dot_when_resolved_then_invalid_tenant() {
    let result = resolver().resolve_from_address(".localhost");

    assert!(matches!(result, Err(AuthError::InvalidTenant { .. })));
}

#[test]
fn given_uppercase_subdomain_when_resolved_then_not_case_folded() {
    let result = resolver().resolve_from_address("ACME.localhost");

    assert!(matches!(result, Err(AuthError::InvalidTenant { .. })));
}

#[test]
fn given_host_forms_when_stripping_port_then_hostname_only() {
    assert_eq!(strip_port("acme.localhost:8000"), "acme.localhost");
    assert_eq!(strip_port("acme.localhost"), "acme.localhost");
    assert_eq!(strip_port("[::1]:8000"), "::1");
    assert_eq!(strip_port("::1"), "::1");
}

proptest! {
    #[test]
    fn given_any_port_when_resolving_then_same_tenant_as_without_port(port in 0u16..) {
        let resolver = resolver();
        let with_port = resolver.resolve_from_address(&format!("acme.localhost:{port}"));

        prop_assert_eq!(with_port.map(|t| t.to_string()).ok(), Some("acme".to_string()));
    }

    #[test]
    fn given_dotless_host_when_resolving_then_always_invalid(host in "[a-z0-9-]{1,30}") {
        let result = resolver().resolve_from_address(&host);

        prop_assert!(
            matches!(result, Err(AuthError::InvalidTenant { .. })),
            "expected InvalidTenant, got {:?}",
            result
        );
    }
}

#[test]
fn given_static_store_when_checking_tenant_names_then_exact_match_only() {
    let store = StaticCredentialStore::new([("token1", "acme"), ("token1b", "acme")]).unwrap();

    assert!(store.is_known_tenant("acme"));
    assert!(!store.is_known_tenant("ACME"));
    assert!(!store.is_known_tenant("token1"));
    assert_eq!(store.tenant_count(), 1);
}
