//! Clock helpers shared by the API layer and the seed data
//!
//! Persisted timestamps are RFC 3339 strings; generated identifiers embed
//! the millisecond clock. Both live here so every crate formats them the
//! same way.

use chrono::{SecondsFormat, Utc};

/// Current wall-clock time as an RFC 3339 string with millisecond precision
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_parses_back() {
        let ts = now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn millis_is_recent() {
        // Anything after 2020 proves we are not reading a zeroed clock.
        assert!(now_millis() > 1_577_836_800_000);
    }
}
