//! Timestamp input and normalization.
//!
//! Stored timestamps are plain strings in the fixed `YYYY-MM-DD HH:MM:SS`
//! format. Input that is already text is kept verbatim; date/time values are
//! reformatted, and anything that cannot be represented falls back to the
//! current wall-clock time.

use core::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Format of every timestamp written to the table.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Timestamp supplied with a [`Reading`](crate::Reading).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// Already a string; stored exactly as given.
    Text(String),
    /// A zoned date/time, stored as the wall time of its own offset.
    DateTime(OffsetDateTime),
    /// A date/time without an offset.
    Naive(PrimitiveDateTime),
    /// Seconds since the Unix epoch, interpreted as UTC.
    Unix(i64),
}

impl Timestamp {
    /// Normalize to the stored string form.
    ///
    /// Values that cannot be converted (for example a Unix timestamp outside
    /// the representable range) are replaced with [`wall_clock_now`].
    #[must_use]
    pub fn normalize(&self) -> String {
        let formatted = match self {
            Timestamp::Text(s) => return s.clone(),
            Timestamp::DateTime(dt) => format_wall_clock(wall_time(*dt)),
            Timestamp::Naive(dt) => format_wall_clock(*dt),
            Timestamp::Unix(secs) => match OffsetDateTime::from_unix_timestamp(*secs) {
                Ok(dt) => format_wall_clock(wall_time(dt)),
                Err(_) => return wall_clock_now(),
            },
        };
        formatted.unwrap_or_else(|_| wall_clock_now())
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Timestamp::Text(value.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Timestamp::Text(value)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Timestamp::DateTime(value)
    }
}

impl From<PrimitiveDateTime> for Timestamp {
    fn from(value: PrimitiveDateTime) -> Self {
        Timestamp::Naive(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalize())
    }
}

/// Current wall-clock time in the stored format.
///
/// Uses the local offset when it can be determined and UTC otherwise.
#[must_use]
pub fn wall_clock_now() -> String {
    let now = wall_time(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()));
    format_wall_clock(now).unwrap_or_else(|_| now.to_string())
}

/// Parse a stored timestamp string back into a date/time.
///
/// Returns `None` for anything not in `YYYY-MM-DD HH:MM:SS` form, which
/// includes verbatim text timestamps in other formats.
#[must_use]
pub fn parse_stored(s: &str) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::parse(s, TIMESTAMP_FORMAT).ok()
}

fn wall_time(dt: OffsetDateTime) -> PrimitiveDateTime {
    PrimitiveDateTime::new(dt.date(), dt.time())
}

fn format_wall_clock(dt: PrimitiveDateTime) -> Result<String, time::error::Format> {
    dt.format(TIMESTAMP_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn test_text_is_kept_verbatim() {
        let ts = Timestamp::from("yesterday-ish");
        assert_eq!(ts.normalize(), "yesterday-ish");
    }

    #[test]
    fn test_naive_is_formatted() {
        let ts = Timestamp::from(datetime!(2024-03-05 07:08:09));
        assert_eq!(ts.normalize(), "2024-03-05 07:08:09");
    }

    #[test]
    fn test_offset_keeps_its_own_wall_time() {
        let ts = Timestamp::from(datetime!(2024-03-05 23:30:00).assume_offset(offset!(+5)));
        assert_eq!(ts.normalize(), "2024-03-05 23:30:00");
    }

    #[test]
    fn test_subsecond_precision_is_dropped() {
        let ts = Timestamp::from(datetime!(2024-03-05 07:08:09.999));
        assert_eq!(ts.normalize(), "2024-03-05 07:08:09");
    }

    #[test]
    fn test_unix_seconds() {
        assert_eq!(Timestamp::Unix(0).normalize(), "1970-01-01 00:00:00");
        assert_eq!(Timestamp::Unix(1_700_000_000).normalize(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_out_of_range_unix_falls_back_to_now() {
        let before = wall_clock_now();
        let stored = Timestamp::Unix(i64::MAX).normalize();
        let after = wall_clock_now();

        assert!(parse_stored(&stored).is_some());
        assert!(before <= stored && stored <= after);
    }

    #[test]
    fn test_normalized_edge_years_parse_back() {
        for dt in [
            datetime!(-0001-06-01 00:00:00),
            datetime!(0000-01-01 00:00:00),
            datetime!(0999-12-31 23:59:59),
            datetime!(9999-12-31 23:59:59),
        ] {
            let stored = Timestamp::from(dt).normalize();
            assert_eq!(parse_stored(&stored), Some(dt), "stored as {stored}");
        }
    }

    #[test]
    fn test_negative_year_is_zero_padded() {
        let ts = Timestamp::from(datetime!(-0001-06-01 00:00:00));
        assert_eq!(ts.normalize(), "-0001-06-01 00:00:00");
    }

    #[test]
    fn test_parse_stored() {
        assert_eq!(
            parse_stored("2024-03-05 07:08:09"),
            Some(datetime!(2024-03-05 07:08:09))
        );
        assert_eq!(parse_stored("2024-03-05T07:08:09Z"), None);
        assert_eq!(parse_stored(""), None);
    }

    #[test]
    fn test_wall_clock_now_format() {
        let now = wall_clock_now();
        assert_eq!(now.len(), 19);
        assert!(parse_stored(&now).is_some());
    }
}
