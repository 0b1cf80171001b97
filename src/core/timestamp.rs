//! Timestamp formatting for log lines
//!
//! Every line carries a short local wall-clock reading in the fixed-width form
//! `DD/MM, HH:MM:SS`. There is no year and no timezone suffix.

use chrono::{Datelike, Local, Timelike};

/// Formats instants as `DD/MM, HH:MM:SS` in local time.
///
/// # Examples
///
/// ```
/// use prefix_logger::core::TimestampFormatter;
/// use chrono::NaiveDate;
///
/// let instant = NaiveDate::from_ymd_opt(2025, 11, 3)
///     .unwrap()
///     .and_hms_opt(9, 5, 0)
///     .unwrap();
/// assert_eq!(TimestampFormatter.format(&instant), "03/11, 09:05:00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampFormatter;

impl TimestampFormatter {
    /// Format any calendar instant. Fields are zero-padded to width 2.
    #[must_use]
    pub fn format<T: Datelike + Timelike>(&self, instant: &T) -> String {
        format!(
            "{:02}/{:02}, {:02}:{:02}:{:02}",
            instant.day(),
            instant.month(),
            instant.hour(),
            instant.minute(),
            instant.second()
        )
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid datetime")
    }

    #[test]
    fn test_single_digit_fields_are_padded() {
        let result = TimestampFormatter.format(&at(2025, 11, 3, 9, 5, 0));
        assert_eq!(result, "03/11, 09:05:00");
    }

    #[test]
    fn test_two_digit_fields_unchanged() {
        let result = TimestampFormatter.format(&at(2024, 12, 31, 23, 59, 58));
        assert_eq!(result, "31/12, 23:59:58");
    }

    #[test]
    fn test_midnight_first_of_january() {
        let result = TimestampFormatter.format(&at(2026, 1, 1, 0, 0, 0));
        assert_eq!(result, "01/01, 00:00:00");
    }

    #[test]
    fn test_now_is_fixed_width() {
        let result = TimestampFormatter.now();
        assert_eq!(result.len(), "DD/MM, HH:MM:SS".len());
        assert_eq!(&result[2..3], "/");
        assert_eq!(&result[5..7], ", ");
    }
}
