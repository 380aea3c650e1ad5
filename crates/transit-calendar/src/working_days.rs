//! Weekday working-day masks.

use serde::{Deserialize, Serialize};
use transit_types::{DayNumber, day_of_week};

/// Bitmask of the weekdays a shipping service works on.
///
/// Sunday is bit 6 (`0x40`) down to Saturday at bit 0 (`0x01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingDays(pub u8);

impl WorkingDays {
    /// No working days.
    pub const NONE: Self = Self(0);
    /// Monday through Friday.
    pub const MONDAY_TO_FRIDAY: Self = Self(0x3E);
    /// Monday through Saturday.
    pub const MONDAY_TO_SATURDAY: Self = Self(0x3F);
    /// Every day of the week.
    pub const EVERY_DAY: Self = Self(0x7F);

    /// Returns the raw mask.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if the weekday (Sunday = 1 .. Saturday = 7) is a working day.
    #[must_use]
    pub const fn includes(self, weekday: u8) -> bool {
        if weekday < 1 || weekday > 7 {
            return false;
        }
        self.0 & (1 << (7 - weekday)) != 0
    }

    /// Returns true if the given day falls on a working weekday.
    #[must_use]
    pub const fn includes_day(self, day: DayNumber) -> bool {
        self.includes(day_of_week(day))
    }

    /// Returns true if no weekday is a working day.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 & 0x7F == 0
    }
}

impl Default for WorkingDays {
    fn default() -> Self {
        Self::MONDAY_TO_FRIDAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_bits() {
        assert!(WorkingDays(0x40).includes(1));
        assert!(WorkingDays(0x01).includes(7));
        assert!(!WorkingDays(0x40).includes(2));
    }

    #[test]
    fn test_monday_to_friday() {
        let mask = WorkingDays::MONDAY_TO_FRIDAY;
        assert!(!mask.includes(1));
        assert!((2..=6).all(|d| mask.includes(d)));
        assert!(!mask.includes(7));
    }

    #[test]
    fn test_out_of_range_weekday() {
        assert!(!WorkingDays::EVERY_DAY.includes(0));
        assert!(!WorkingDays::EVERY_DAY.includes(8));
        assert!(WorkingDays::NONE.is_empty());
    }
}
