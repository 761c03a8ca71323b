use crate::range::ensure_in_range;
use crate::{
    ConfigErrorResult, DEFAULT_STORAGE_TIMEOUT_MS, MAX_STORAGE_TIMEOUT_MS, MIN_STORAGE_TIMEOUT_MS,
};

use std::time::Duration;

use serde::Deserialize;

/// Event store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Upper bound on a single event write; a write exceeding it fails the ingest
    pub timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_STORAGE_TIMEOUT_MS,
        }
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_in_range(
            "storage.timeout_ms",
            self.timeout_ms,
            MIN_STORAGE_TIMEOUT_MS..=MAX_STORAGE_TIMEOUT_MS,
        )
    }
}
