use crate::connection_rate_limiter::quota_for;
use crate::{ConnectionRateLimiter, RateLimitConfig};

use governor::Quota;

/// Hands every new subscriber session its own limiter from one shared quota.
#[derive(Clone)]
pub struct RateLimiterFactory {
    quota: Quota,
    config: RateLimitConfig,
}

impl RateLimiterFactory {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            quota: quota_for(&config),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn create(&self) -> ConnectionRateLimiter {
        ConnectionRateLimiter::with_quota(self.quota, self.config.clone())
    }
}

impl Default for RateLimiterFactory {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
