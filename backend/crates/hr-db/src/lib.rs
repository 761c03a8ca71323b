pub mod error;
pub mod event_store;
pub mod repositories;

pub use error::{DbError, Result};
pub use event_store::EventStore;
pub use repositories::webhook_event_repository::WebhookEventRepository;

/// Migrations for the event database, embedded at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
