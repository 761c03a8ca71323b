use crate::ConfigErrorResult;
use crate::range::ensure_in_range;

use serde::Deserialize;

pub const MAX_RATE_LIMIT_REQUESTS: u32 = 10000;
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;

pub const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 3600;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Cap on frames one subscriber may send; exceeding it ends the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_in_range(
            "rate_limit.max_requests",
            self.max_requests,
            1..=MAX_RATE_LIMIT_REQUESTS,
        )?;
        ensure_in_range(
            "rate_limit.window_secs",
            self.window_secs,
            1..=MAX_RATE_LIMIT_WINDOW_SECS,
        )
    }
}
