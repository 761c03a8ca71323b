use crate::{ConfigError, ConfigErrorResult};

use std::fmt::Display;
use std::ops::RangeInclusive;

/// Reject `value` unless it lies within `allowed`.
#[track_caller]
pub(crate) fn ensure_in_range<T>(
    field: &str,
    value: T,
    allowed: RangeInclusive<T>,
) -> ConfigErrorResult<()>
where
    T: PartialOrd + Display,
{
    if allowed.contains(&value) {
        return Ok(());
    }

    Err(ConfigError::config(format!(
        "{field} must be {}-{}, got {value}",
        allowed.start(),
        allowed.end()
    )))
}
