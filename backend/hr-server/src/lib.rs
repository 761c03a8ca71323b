pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::{ApiError, Result as ApiResult},
    events::{
        ClearEventsResponse, EventDto, EventListResponse, clear_events, list_events,
    },
    extractors::authenticated_tenant::AuthenticatedTenant,
    ingest::{IngestResponse, capture},
};
pub use routes::{build_ingest_router, build_relay_router};
pub use state::build_app_state;
