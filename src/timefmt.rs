//! Display formatting for stored timestamps.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Asia::Tokyo;

const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert a stored UTC-naive timestamp to Asia/Tokyo for display.
///
/// Total: anything that does not parse as `YYYY-MM-DD HH:MM:SS` is returned
/// unchanged rather than reported as an error.
pub fn format_for_display(created_at: &str) -> String {
    match NaiveDateTime::parse_from_str(created_at, STORED_FORMAT) {
        Ok(naive) => Utc
            .from_utc_datetime(&naive)
            .with_timezone(&Tokyo)
            .format(STORED_FORMAT)
            .to_string(),
        Err(_) => created_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_utc_to_tokyo() {
        // JST is UTC+9, no DST.
        assert_eq!(
            format_for_display("2024-01-15 03:00:00"),
            "2024-01-15 12:00:00"
        );
    }

    #[test]
    fn conversion_can_roll_the_date() {
        assert_eq!(
            format_for_display("2024-01-15 20:30:00"),
            "2024-01-16 05:30:00"
        );
    }

    #[test]
    fn malformed_input_passes_through_unchanged() {
        assert_eq!(format_for_display("not-a-date"), "not-a-date");
        assert_eq!(format_for_display(""), "");
        assert_eq!(
            format_for_display("2024-01-15T03:00:00Z"),
            "2024-01-15T03:00:00Z"
        );
    }
}
