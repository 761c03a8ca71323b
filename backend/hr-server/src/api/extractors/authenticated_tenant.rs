//! Tenant of an event query request, from its credential

use crate::ApiError;

use hr_auth::extract_credential;
use hr_core::TenantId;
use hr_ws::AppState;

use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use error_location::ErrorLocation;

/// The tenant owning the `Authorization` credential (raw or `Bearer`).
pub struct AuthenticatedTenant(pub TenantId);

impl FromRequestParts<AppState> for AuthenticatedTenant {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let credential =
            extract_credential(authorization, None).ok_or_else(|| ApiError::Unauthorized {
                message: "missing Authorization header".into(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let tenant = state.resolver.resolve_from_credential(credential)?;
        log::debug!("Authenticated query for tenant {tenant}");

        Ok(AuthenticatedTenant(tenant))
    }
}
