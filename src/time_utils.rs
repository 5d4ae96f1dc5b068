// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a Unix timestamp (seconds) as RFC3339, if it is representable.
pub fn format_unix_rfc3339(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(format_utc_rfc3339)
}

/// Midnight UTC at the start of the given day, if the date exists.
pub fn utc_midnight(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

/// Midnight UTC on January 1st of `now`'s year.
pub fn start_of_year(now: DateTime<Utc>) -> DateTime<Utc> {
    utc_midnight(now.year(), 1, 1).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unix() {
        assert_eq!(
            format_unix_rfc3339(1_800_000_000).as_deref(),
            Some("2027-01-15T08:00:00Z")
        );
        assert_eq!(format_unix_rfc3339(i64::MAX), None);
    }

    #[test]
    fn test_start_of_year() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 15, 4, 5).unwrap();
        assert_eq!(
            start_of_year(now),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_utc_midnight_rejects_invalid_dates() {
        assert_eq!(utc_midnight(2026, 2, 29), None);
        assert!(utc_midnight(2028, 2, 29).is_some());
    }
}
