//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Unix timestamp in whole seconds, as sent on the wire: `1700000000`
pub fn format_unix_seconds(time: DateTime) -> String {
    time.timestamp().to_string()
}

/// Nanoseconds since the Unix epoch.
///
/// Falls back to microsecond precision scaled up when the value does not fit
/// in an `i64`, which only happens past the year 2262.
pub fn unix_nanos(time: DateTime) -> i128 {
    match time.timestamp_nanos_opt() {
        Some(v) => v as i128,
        None => time.timestamp_micros() as i128 * 1000,
    }
}
