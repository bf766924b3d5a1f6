//! Calendar-day helpers
//!
//! Dates are opaque `YYYY-MM-DD` strings everywhere in the engine. This module is the
//! only place that converts them to and from `chrono::NaiveDate`, for window expansion.

use crate::error::{JournalError, Result};
use chrono::{Datelike, Duration, NaiveDate};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar day as zero-padded `YYYY-MM-DD`
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse a zero-padded `YYYY-MM-DD` string.
///
/// Rejects unpadded forms such as `2024-1-5` so that string order stays calendar order.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    if !is_canonical_day(value) {
        return Err(JournalError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map_err(|_| JournalError::InvalidDate(value.to_string()))
}

/// Whether `value` has the exact `YYYY-MM-DD` shape
pub fn is_canonical_day(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Every day in `[start, end]`, inclusive
pub fn day_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// First day of a month, or an error for an impossible month
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(JournalError::InvalidMonth { year, month })
}

/// Number of days in a month (1-based month)
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok((next - first).num_days() as u32)
}

/// Last day of a month
pub fn last_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let first = first_of_month(year, month)?;
    Ok(first + Duration::days(i64::from(days_in_month(year, month)?) - 1))
}

/// Empty slots before day 1 in a Sunday-first weekly grid
pub fn month_leading_blanks(year: i32, month: u32) -> Result<u32> {
    Ok(first_of_month(year, month)?
        .weekday()
        .num_days_from_sunday())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_padding() {
        assert!(parse_day("2024-01-05").is_ok());
        assert!(matches!(
            parse_day("2024-1-5"),
            Err(JournalError::InvalidDate(_))
        ));
        assert!(parse_day("2024-02-30").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert!(days_in_month(2024, 13).is_err());
        assert!(days_in_month(2024, 0).is_err());
    }

    #[test]
    fn test_month_leading_blanks() {
        // 2024-09-01 is a Sunday, 2024-02-01 a Thursday
        assert_eq!(month_leading_blanks(2024, 9).unwrap(), 0);
        assert_eq!(month_leading_blanks(2024, 2).unwrap(), 4);
    }

    #[test]
    fn test_day_range_inclusive() {
        let start = parse_day("2023-12-30").unwrap();
        let end = parse_day("2024-01-02").unwrap();
        let days: Vec<String> = day_range(start, end).map(format_day).collect();
        assert_eq!(
            days,
            vec!["2023-12-30", "2023-12-31", "2024-01-01", "2024-01-02"]
        );
    }
}
