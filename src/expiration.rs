//! Expiration instants: accepted input shapes and the stored text format.

use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

/// On-disk expiration pattern: local time, second precision, no timezone.
/// Example: `2024-03-15 09:30:00`.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An expiration value as accepted by `set_expiration`.
///
/// `InSeconds` and `At` always resolve; `Text` resolves only if it parses
/// as a date/time (see `parse_instant` for the accepted patterns).
#[derive(Debug, Clone, PartialEq)]
pub enum ExpiresAt {
    /// Offset in whole seconds from the current instant (may be negative)
    InSeconds(i64),
    /// An already-constructed instant, formatted directly
    At(DateTime<Local>),
    /// A textual date/time, validated on use
    Text(String),
}

impl ExpiresAt {
    /// Resolve to a concrete instant, or `None` for unparseable text.
    pub fn resolve(&self) -> Option<DateTime<Local>> {
        match self {
            ExpiresAt::InSeconds(secs) => Some(Local::now() + Duration::seconds(*secs)),
            ExpiresAt::At(instant) => Some(*instant),
            ExpiresAt::Text(text) => parse_instant(text),
        }
    }
}

impl fmt::Display for ExpiresAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiresAt::InSeconds(secs) => write!(f, "{}s from now", secs),
            ExpiresAt::At(instant) => write!(f, "{}", format_instant(instant)),
            ExpiresAt::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<i64> for ExpiresAt {
    fn from(secs: i64) -> Self {
        ExpiresAt::InSeconds(secs)
    }
}

impl From<DateTime<Local>> for ExpiresAt {
    fn from(instant: DateTime<Local>) -> Self {
        ExpiresAt::At(instant)
    }
}

impl From<&str> for ExpiresAt {
    fn from(text: &str) -> Self {
        ExpiresAt::Text(text.to_string())
    }
}

impl From<String> for ExpiresAt {
    fn from(text: String) -> Self {
        ExpiresAt::Text(text)
    }
}

/// Format an instant in the stored expiration pattern.
pub fn format_instant(instant: &DateTime<Local>) -> String {
    instant.format(EXPIRATION_FORMAT).to_string()
}

/// Parse a textual date/time into a local instant.
///
/// Accepts the stored `YYYY-MM-DD HH:mm:ss` pattern, RFC 3339 (converted to
/// local time), and a bare `YYYY-MM-DD` date taken as local midnight.
pub fn parse_instant(text: &str) -> Option<DateTime<Local>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, EXPIRATION_FORMAT) {
        return Local.from_local_datetime(&naive).earliest();
    }
    if let Ok(fixed) = DateTime::parse_from_rfc3339(text) {
        return Some(fixed.with_timezone(&Local));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Local.from_local_datetime(&midnight).earliest();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_pattern() {
        let parsed = parse_instant("2024-03-15 09:30:00").unwrap();
        assert_eq!(format_instant(&parsed), "2024-03-15 09:30:00");
    }

    #[test]
    fn test_parse_rfc3339() {
        assert!(parse_instant("2024-03-15T09:30:00Z").is_some());
        assert!(parse_instant("2024-03-15T09:30:00+02:00").is_some());
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let parsed = parse_instant("2024-03-15").unwrap();
        assert_eq!(format_instant(&parsed), "2024-03-15 00:00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_instant("not-a-date").is_none());
        assert!(parse_instant("").is_none());
        assert!(parse_instant("2024-13-45 99:99:99").is_none());
    }

    #[test]
    fn test_resolve_seconds_offset() {
        let resolved = ExpiresAt::InSeconds(60).resolve().unwrap();
        let delta = (resolved - Local::now()).num_seconds();
        assert!((59..=61).contains(&delta));
    }

    #[test]
    fn test_resolve_negative_offset() {
        let resolved = ExpiresAt::InSeconds(-60).resolve().unwrap();
        assert!(resolved < Local::now());
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(ExpiresAt::from(30i64), ExpiresAt::InSeconds(30));
        assert_eq!(
            ExpiresAt::from("2030-01-01"),
            ExpiresAt::Text("2030-01-01".to_string())
        );
    }
}
