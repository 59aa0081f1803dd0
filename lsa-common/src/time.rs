//! Timestamp utilities

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Error, Result};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a timestamp read from the database
///
/// Accepts RFC 3339 (what this crate writes) and SQLite's
/// `CURRENT_TIMESTAMP` format `YYYY-MM-DD HH:MM:SS`, taken as UTC.
pub fn parse_db_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::Internal(format!("Invalid timestamp '{}': {}", value, e)))
}

/// Short date used in the CSV log, e.g. `3/7/2025`
pub fn format_short_date(ts: &DateTime<Utc>) -> String {
    ts.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_db_timestamp("2025-03-07T14:30:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 7, 14, 30, 0).unwrap());

        let ts = parse_db_timestamp("2025-03-07T16:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 7, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_sqlite_current_timestamp() {
        let ts = parse_db_timestamp("2024-11-02 08:05:09").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 11, 2, 8, 5, 9).unwrap());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_db_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_format_short_date() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(format_short_date(&ts), "3/7/2025");

        let ts = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(format_short_date(&ts), "12/25/2024");
    }
}
