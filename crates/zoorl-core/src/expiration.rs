use crate::clock::Clock;
use crate::error::{Result, UrlHashError};

/// TTL applied when the caller does not provide one: one day.
pub const DEFAULT_TTL_HOURS: i64 = 24;

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1_000;

/// Picks the TTL, in hours, to apply to a new record.
///
/// A missing TTL and a TTL of zero both fall back to [`DEFAULT_TTL_HOURS`].
/// Negative values are passed through unchanged.
pub fn resolve_ttl_hours(ttl: Option<i64>) -> i64 {
    match ttl {
        None | Some(0) => DEFAULT_TTL_HOURS,
        Some(hours) => hours,
    }
}

/// Computes the UNIX epoch second `hours_from_now` hours after the clock's now.
///
/// Sub-second precision of the clock is floored away. The only rejected
/// input is one whose arithmetic overflows.
pub fn compute_expiration<C: Clock + ?Sized>(clock: &C, hours_from_now: i64) -> Result<i64> {
    let now_ms = clock.now().as_millisecond();

    hours_from_now
        .checked_mul(MILLIS_PER_HOUR)
        .and_then(|delta| now_ms.checked_add(delta))
        .map(|expire_ms| expire_ms.div_euclid(1_000))
        .ok_or_else(|| {
            UrlHashError::InvalidInput(format!("ttl of {hours_from_now} hours is out of range"))
        })
}
