//! Time helpers
//!
//! Timestamps are stored as Unix epoch milliseconds (i64) throughout the
//! database layer; chrono types live only at the API boundary.

use chrono::{DateTime, TimeZone, Utc};

/// Convert a chrono timestamp to epoch milliseconds
pub fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

/// Convert epoch milliseconds back to a chrono timestamp
///
/// Out-of-range values clamp to the Unix epoch rather than panic.
pub fn from_millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip() {
        let now = Utc::now();
        let ms = to_millis(now);
        assert_eq!(to_millis(from_millis(ms)), ms);
    }
}
