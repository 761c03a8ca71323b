use crate::{AuthError, RateLimitConfig, Result as AuthResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};

/// Frame budget for one subscriber session
pub struct ConnectionRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: RateLimitConfig,
}

impl ConnectionRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_quota(quota_for(&config), config)
    }

    pub(crate) fn with_quota(quota: Quota, config: RateLimitConfig) -> Self {
        Self {
            limiter: RateLimiter::direct(quota),
            config,
        }
    }

    /// Spend one frame from the budget.
    #[track_caller]
    pub fn check(&self) -> AuthResult<()> {
        self.limiter
            .check()
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_requests,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// `max_requests` may arrive at once; afterwards one frame is refunded every
/// `window / max_requests`. Zero values are clamped to one.
pub(crate) fn quota_for(config: &RateLimitConfig) -> Quota {
    let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
    let window = Duration::from_secs(config.window_secs.max(1));

    Quota::with_period(window / burst.get())
        .unwrap_or_else(|| Quota::per_second(burst))
        .allow_burst(burst)
}
