//! Timestamp formatting for the `time` command
//!
//! Timestamps look like `1:03pm, Tuesday, September 13, 2016`: unpadded
//! hour and day, lowercase am/pm, fixed English names.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const DISPLAY_FORMAT: &str = "%-I:%M%P, %A, %B %-d, %Y";
const PARSE_FORMAT: &str = "%I:%M%p, %A, %B %d, %Y";

/// Format a point in time for display and for the timestamp file
pub fn format_timestamp<Tz>(when: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: core::fmt::Display,
{
    when.format(DISPLAY_FORMAT).to_string()
}

/// Current local time, formatted
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Parse a timestamp produced by [`format_timestamp`].
///
/// Returns None if the text is not a well-formed timestamp.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), PARSE_FORMAT).ok()
}
