//! Clock-face formatting for timer displays.
//!
//! Timer widgets show their state as `HH:MM:SS`, with a leading `-` while a
//! countdown is still running. Every field is zero-padded to two digits; the
//! hour group grows past two digits once a session reaches 100 hours.
//!
//! ```rust
//! use bubbletea_voicetimer::clock;
//!
//! assert_eq!(clock::format(5, false), "00:00:05");
//! assert_eq!(clock::format(5, true), "-00:00:05");
//! assert_eq!(clock::format(3661, false), "01:01:01");
//! ```

/// Splits a number of seconds into hours, minutes and seconds.
pub fn split(total_seconds: u64) -> (u64, u64, u64) {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    (hours, minutes, seconds)
}

/// Formats `total_seconds` as `HH:MM:SS`, prefixed with `-` when `negative`.
///
/// No upper bound is enforced: 360000 seconds renders as `100:00:00`.
pub fn format(total_seconds: u64, negative: bool) -> String {
    let (hours, minutes, seconds) = split(total_seconds);
    let sign = if negative { "-" } else { "" };
    format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
}

/// Reads a countdown input the way a numeric form field is read.
///
/// Surrounding whitespace is ignored. Returns `None` for empty or
/// non-integer input.
pub fn parse_seconds_input(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_values() {
        assert_eq!(format(0, false), "00:00:00");
        assert_eq!(format(5, false), "00:00:05");
        assert_eq!(format(5, true), "-00:00:05");
        assert_eq!(format(0, true), "-00:00:00");
    }

    #[test]
    fn test_format_hours_minutes_seconds() {
        assert_eq!(format(3661, false), "01:01:01");
        assert_eq!(format(59, false), "00:00:59");
        assert_eq!(format(60, false), "00:01:00");
        assert_eq!(format(3599, false), "00:59:59");
        assert_eq!(format(86399, false), "23:59:59");
    }

    #[test]
    fn test_format_does_not_clamp_hours() {
        assert_eq!(format(99 * 3600 + 59 * 60 + 59, false), "99:59:59");
        assert_eq!(format(100 * 3600, false), "100:00:00");
        assert_eq!(format(100 * 3600 + 1, true), "-100:00:01");
    }

    #[test]
    fn test_split() {
        assert_eq!(split(0), (0, 0, 0));
        assert_eq!(split(3661), (1, 1, 1));
        assert_eq!(split(7322), (2, 2, 2));
    }

    #[test]
    fn test_parse_seconds_input() {
        assert_eq!(parse_seconds_input("10"), Some(10));
        assert_eq!(parse_seconds_input(" 7 "), Some(7));
        assert_eq!(parse_seconds_input("0"), Some(0));
        assert_eq!(parse_seconds_input("-3"), Some(-3));
        assert_eq!(parse_seconds_input(""), None);
        assert_eq!(parse_seconds_input("   "), None);
        assert_eq!(parse_seconds_input("ten"), None);
        assert_eq!(parse_seconds_input("2.5"), None);
    }
}
