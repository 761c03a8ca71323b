pub mod error;
pub mod events;
pub mod extractors;
pub mod ingest;
