//! Calendar-day helpers shared by the streak and timer engines.
//!
//! Same-day detection compares date-only strings; day distance is the floor
//! of the absolute millisecond difference over one day. The two checks are
//! intentionally distinct and callers that need both must apply the string
//! check first: an interval crossing midnight can be under 24h and still be
//! a different calendar day, in which case `days_between` reports 0.

use chrono::{DateTime, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Date-only key, e.g. `"2026-08-29"`.
pub fn day_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// True iff both timestamps fall on the same calendar date.
pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Whole days between two instants: `floor(abs(b - a) / 86_400_000)`.
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b.timestamp_millis() - a.timestamp_millis()).abs() / MS_PER_DAY
}

/// Decode a persisted epoch-millisecond timestamp.
///
/// Unrepresentable values fall back to the epoch, which downstream logic
/// treats as an ancient visit (streak reset) rather than an error.
pub fn from_epoch_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}
