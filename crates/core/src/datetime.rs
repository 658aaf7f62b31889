//! Strict date-time parsing and formatting for the ledger API.
//!
//! Date filters arrive as `YYYY-MM-DD HH:MM:SS` strings and must match that
//! shape exactly; anything else is a validation error, never a silent
//! best-effort parse. Response timestamps are rendered without an offset
//! suffix (`YYYY-MM-DDTHH:MM:SS`, UTC).

use chrono::NaiveDateTime;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Accepted format for `startDate` / `endDate` query parameters.
pub const FILTER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used for all timestamps in response bodies.
pub const RESPONSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a date filter, enforcing the exact `YYYY-MM-DD HH:MM:SS` shape.
///
/// chrono tolerates some deviations (unpadded fields) that the contract
/// does not, so the parsed value is formatted back and compared against
/// the input. `field` names the offending parameter in the error message.
pub fn parse_filter_datetime(raw: &str, field: &str) -> Result<Timestamp, CoreError> {
    let parsed = NaiveDateTime::parse_from_str(raw, FILTER_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "{field} must match the format YYYY-MM-DD HH:MM:SS"
        ))
    })?;
    if parsed.format(FILTER_FORMAT).to_string() != raw {
        return Err(CoreError::Validation(format!(
            "{field} must match the format YYYY-MM-DD HH:MM:SS"
        )));
    }
    Ok(parsed.and_utc())
}

/// Render a timestamp for a response body.
pub fn format_response(ts: &Timestamp) -> String {
    ts.format(RESPONSE_FORMAT).to_string()
}

/// An optional inclusive `[start, end]` window over row timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl DateRange {
    /// Parse the optional `startDate` / `endDate` pair of a request.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, CoreError> {
        let start = start
            .map(|raw| parse_filter_datetime(raw, "startDate"))
            .transpose()?;
        let end = end
            .map(|raw| parse_filter_datetime(raw, "endDate"))
            .transpose()?;
        Ok(Self { start, end })
    }

    /// Whether any bound is set at all.
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Inclusive containment check; an unset bound never excludes.
    pub fn contains(&self, ts: &Timestamp) -> bool {
        if let Some(start) = &self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if ts > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(raw: &str) -> Timestamp {
        parse_filter_datetime(raw, "test").unwrap()
    }

    #[test]
    fn accepts_exact_format() {
        let parsed = ts("2024-06-01 13:45:09");
        assert_eq!(
            parsed,
            chrono::Utc.with_ymd_and_hms(2024, 6, 1, 13, 45, 9).unwrap()
        );
    }

    #[test]
    fn rejects_date_without_time() {
        assert!(parse_filter_datetime("2024-06-01", "startDate").is_err());
    }

    #[test]
    fn rejects_iso_t_separator() {
        assert!(parse_filter_datetime("2024-06-01T13:45:09", "startDate").is_err());
    }

    #[test]
    fn rejects_unpadded_fields() {
        assert!(parse_filter_datetime("2024-6-1 3:45:09", "startDate").is_err());
    }

    #[test]
    fn rejects_impossible_values() {
        assert!(parse_filter_datetime("2024-13-01 00:00:00", "startDate").is_err());
        assert!(parse_filter_datetime("2024-01-01 25:00:00", "startDate").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_filter_datetime("abc", "startDate").is_err());
        assert!(parse_filter_datetime("", "startDate").is_err());
    }

    #[test]
    fn error_names_the_field() {
        let err = parse_filter_datetime("nope", "endDate").unwrap_err();
        assert!(err.to_string().contains("endDate"));
    }

    #[test]
    fn response_format_has_t_separator_and_no_offset() {
        let rendered = format_response(&ts("2024-06-01 13:45:09"));
        assert_eq!(rendered, "2024-06-01T13:45:09");
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = DateRange::parse(
            Some("2024-01-01 00:00:00"),
            Some("2024-01-31 23:59:59"),
        )
        .unwrap();
        assert!(range.contains(&ts("2024-01-01 00:00:00")));
        assert!(range.contains(&ts("2024-01-31 23:59:59")));
        assert!(range.contains(&ts("2024-01-15 12:00:00")));
        assert!(!range.contains(&ts("2023-12-31 23:59:59")));
        assert!(!range.contains(&ts("2024-02-01 00:00:00")));
    }

    #[test]
    fn unbounded_range_contains_everything() {
        let range = DateRange::default();
        assert!(!range.is_bounded());
        assert!(range.contains(&ts("1999-01-01 00:00:00")));
        assert!(range.contains(&ts("2099-01-01 00:00:00")));
    }

    #[test]
    fn half_open_ranges_filter_one_side_only() {
        let from = DateRange::parse(Some("2024-01-01 00:00:00"), None).unwrap();
        assert!(from.contains(&ts("2099-01-01 00:00:00")));
        assert!(!from.contains(&ts("2023-01-01 00:00:00")));

        let until = DateRange::parse(None, Some("2024-01-01 00:00:00")).unwrap();
        assert!(until.contains(&ts("2023-01-01 00:00:00")));
        assert!(!until.contains(&ts("2099-01-01 00:00:00")));
    }
}
