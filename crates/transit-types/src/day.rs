//! Julian day numbers and calendar fields.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::TransitError;

/// A calendar day as a Julian day number (2000-01-01 is 2451545).
pub type DayNumber = i64;

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Julian day number of the day before 0001-01-01 in the proleptic Gregorian calendar.
const JULIAN_DAY_OF_CE_EPOCH: i64 = 1_721_425;

/// Returns the Julian day number of a date.
#[must_use]
pub fn day_number(date: NaiveDate) -> DayNumber {
    i64::from(date.num_days_from_ce()) + JULIAN_DAY_OF_CE_EPOCH
}

/// Returns the date of a Julian day number, if representable.
#[must_use]
pub fn date_of(day: DayNumber) -> Option<NaiveDate> {
    day.checked_sub(JULIAN_DAY_OF_CE_EPOCH)
        .and_then(|days| i32::try_from(days).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Parses a `YYYY-MM-DD` string into a day number.
///
/// # Errors
///
/// Returns an error if the string is not a valid date.
pub fn parse_day(s: &str) -> Result<DayNumber, TransitError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map(day_number)
        .map_err(|_| TransitError::InvalidDate(s.to_string()))
}

/// Returns the day of week with Sunday = 1 through Saturday = 7.
#[must_use]
pub const fn day_of_week(day: DayNumber) -> u8 {
    ((day.rem_euclid(7) + 1) % 7 + 1) as u8
}

/// Returns the month of year (1-12), or 0 when the day is out of range.
#[must_use]
pub fn month_of_year(day: DayNumber) -> u8 {
    date_of(day).map_or(0, |date| date.month() as u8)
}

/// Order or payment time as supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTime {
    /// Calendar day.
    pub day: DayNumber,
    /// Seconds since the start of the day (values past one day wrap).
    pub seconds: i64,
}

impl OrderTime {
    /// Creates a new order time.
    #[must_use]
    pub const fn new(day: DayNumber, seconds: i64) -> Self {
        Self { day, seconds }
    }

    /// Returns the hour of day (0-23).
    #[must_use]
    pub const fn hour_of_day(&self) -> i64 {
        self.seconds.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_HOUR
    }

    /// Returns the day of week with Sunday = 1.
    #[must_use]
    pub const fn day_of_week(&self) -> u8 {
        day_of_week(self.day)
    }

    /// Returns the month of year (1-12).
    #[must_use]
    pub fn month_of_year(&self) -> u8 {
        month_of_year(self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_number_reference() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(day_number(date), 2_451_545);
        assert_eq!(date_of(2_451_545), Some(date));
    }

    #[test]
    fn test_day_of_week_sunday_is_one() {
        // 2024-01-07 was a Sunday, 2000-01-01 a Saturday.
        let sunday = day_number(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(day_of_week(sunday), 1);
        assert_eq!(day_of_week(sunday + 1), 2);
        assert_eq!(day_of_week(2_451_545), 7);
    }

    #[test]
    fn test_day_of_week_is_periodic() {
        for day in 2_451_545..2_451_545 + 400 {
            assert_eq!(day_of_week(day), day_of_week(day + 7));
            assert!((1..=7).contains(&day_of_week(day)));
        }
    }

    #[test]
    fn test_extreme_day_numbers() {
        assert_eq!(date_of(i64::MIN + 5), None);
        assert_eq!(date_of(i64::MAX), None);
        assert_eq!(month_of_year(i64::MIN), 0);
        assert_eq!(day_of_week(i64::MAX), day_of_week(i64::MAX - 7));
        assert_eq!(day_of_week(i64::MIN + 7), day_of_week(i64::MIN));
        assert!((1..=7).contains(&day_of_week(i64::MIN)));
        let order = OrderTime::new(i64::MIN + 5, i64::MIN);
        assert!(order.hour_of_day() < 24);
        assert_eq!(order.month_of_year(), 0);
    }

    #[test]
    fn test_month_of_year() {
        let day = parse_day("2024-02-29").unwrap();
        assert_eq!(month_of_year(day), 2);
        assert_eq!(month_of_year(i64::MIN / 2), 0);
    }

    #[test]
    fn test_parse_day_invalid() {
        assert!(parse_day("2024-13-01").is_err());
        assert!(parse_day("yesterday").is_err());
    }

    #[test]
    fn test_order_time_hour() {
        let order = OrderTime::new(2_451_545, 13 * SECONDS_PER_HOUR + 59);
        assert_eq!(order.hour_of_day(), 13);
        let wrapped = OrderTime::new(2_451_545, SECONDS_PER_DAY + 2 * SECONDS_PER_HOUR);
        assert_eq!(wrapped.hour_of_day(), 2);
    }
}
