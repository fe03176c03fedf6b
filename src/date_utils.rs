//! Date parsing and formatting helpers.
//!
//! All timestamps are handled in UTC. Month and day buckets are taken from
//! the UTC calendar date of a transaction.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Parse a user-supplied date. Accepts RFC 3339 timestamps (any offset,
/// normalised to UTC) or a bare `YYYY-MM-DD`, which is read as midnight UTC.
pub fn parse_date_input(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Fixed-width representation used in the database so that text ordering
/// matches chronological ordering.
pub fn to_storage(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_storage(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// `YYYY-MM` key for a calendar month.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// `YYYY-MM-DD` key for a calendar day.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
