//! Holiday calendars over a fixed window of days.

use std::collections::HashMap;

use chrono::NaiveDate;
use transit_types::{CountryId, DayNumber, day_number};

use crate::WorkingDays;

/// Number of days covered by each calendar (about two and a half years).
pub const WINDOW_DAYS: usize = 915;

/// Default number of days examined by [`HolidayCalendar::distance_to_next_working_day`].
pub const DEFAULT_MAX_PROBE: u32 = 7;

const WORDS: usize = WINDOW_DAYS.div_ceil(64);

/// Days a calendar built "now" reaches into the past.
const LOOKBACK_DAYS: DayNumber = 365;

/// Holidays of one country as a bitset anchored at `start_day`.
///
/// Days outside `[start_day, start_day + WINDOW_DAYS)` are never holidays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    start_day: DayNumber,
    bits: [u64; WORDS],
}

impl HolidayCalendar {
    /// Creates an empty calendar whose window starts at `start_day`.
    #[must_use]
    pub const fn new(start_day: DayNumber) -> Self {
        Self {
            start_day,
            bits: [0; WORDS],
        }
    }

    /// Creates an empty calendar anchored one year before `today`.
    #[must_use]
    pub const fn anchored_at(today: DayNumber) -> Self {
        Self::new(today.saturating_sub(LOOKBACK_DAYS))
    }

    /// Returns the first day of the window.
    #[must_use]
    pub const fn start_day(&self) -> DayNumber {
        self.start_day
    }

    /// Returns the first day past the window.
    #[must_use]
    pub const fn end_day(&self) -> DayNumber {
        self.start_day.saturating_add(WINDOW_DAYS as DayNumber)
    }

    const fn offset(&self, day: DayNumber) -> Option<usize> {
        match day.checked_sub(self.start_day) {
            Some(offset) if offset >= 0 && offset < WINDOW_DAYS as DayNumber => {
                Some(offset as usize)
            }
            _ => None,
        }
    }

    /// Marks a day as a holiday. Returns false if the day is outside the window.
    pub const fn set_holiday(&mut self, day: DayNumber) -> bool {
        match self.offset(day) {
            Some(offset) => {
                self.bits[offset / 64] |= 1 << (offset % 64);
                true
            }
            None => false,
        }
    }

    /// Marks a calendar date as a holiday. Returns false if it is outside the window.
    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        self.set_holiday(day_number(date))
    }

    /// Returns true if the day is a marked holiday inside the window.
    #[must_use]
    pub const fn is_holiday(&self, day: DayNumber) -> bool {
        match self.offset(day) {
            Some(offset) => self.bits[offset / 64] & (1 << (offset % 64)) != 0,
            None => false,
        }
    }

    /// Returns the number of holidays marked in the window.
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns all marked holidays in ascending order.
    pub fn holidays(&self) -> impl Iterator<Item = DayNumber> + '_ {
        (self.start_day..self.end_day()).filter(|&day| self.is_holiday(day))
    }

    /// Returns true if the day is neither a holiday nor outside `working_days`.
    #[must_use]
    pub const fn is_working_day(&self, day: DayNumber, working_days: WorkingDays) -> bool {
        !self.is_holiday(day) && working_days.includes_day(day)
    }

    /// Walks forward from `start` until a working day is found.
    ///
    /// Returns the number of days skipped before the first working day and
    /// whether one was found; the walk gives up after `max_probe` days, in
    /// which case the distance equals `max_probe`.
    #[must_use]
    pub const fn distance_to_next_working_day(
        &self,
        start: DayNumber,
        working_days: WorkingDays,
        max_probe: u32,
    ) -> (u32, bool) {
        let mut distance = 0;
        while distance < max_probe {
            if self.is_working_day(start.saturating_add(distance as DayNumber), working_days) {
                return (distance, true);
            }
            distance += 1;
        }
        (distance, false)
    }

    /// Returns the day reached after `business_days` working days following `start`.
    ///
    /// With an empty working-day mask every day counts.
    #[must_use]
    pub const fn advance_business_days(
        &self,
        start: DayNumber,
        business_days: u32,
        working_days: WorkingDays,
    ) -> DayNumber {
        if working_days.is_empty() {
            return start.saturating_add(business_days as DayNumber);
        }
        let mut day = start;
        let mut remaining = business_days;
        while remaining > 0 {
            day = match day.checked_add(1) {
                Some(next) => next,
                None => return day,
            };
            if self.is_working_day(day, working_days) {
                remaining -= 1;
            }
        }
        day
    }
}

/// Holiday calendars keyed by country, at most one per country.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendars {
    calendars: HashMap<CountryId, HolidayCalendar>,
}

impl HolidayCalendars {
    /// Creates an empty set of calendars.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds calendars anchored at `start_day` from `(country, date)` pairs.
    ///
    /// Dates outside the window are ignored.
    #[must_use]
    pub fn from_dates<I>(start_day: DayNumber, dates: I) -> Self
    where
        I: IntoIterator<Item = (CountryId, NaiveDate)>,
    {
        let mut calendars: HashMap<CountryId, HolidayCalendar> = HashMap::new();
        for (country, date) in dates {
            calendars
                .entry(country)
                .or_insert_with(|| HolidayCalendar::new(start_day))
                .set_date(date);
        }
        Self { calendars }
    }

    /// Adds or replaces a country's calendar.
    pub fn insert(&mut self, country: CountryId, calendar: HolidayCalendar) {
        self.calendars.insert(country, calendar);
    }

    /// Returns a country's calendar.
    #[must_use]
    pub fn get(&self, country: CountryId) -> Option<&HolidayCalendar> {
        self.calendars.get(&country)
    }

    /// Returns true if the day is a holiday in that country.
    ///
    /// Countries without a calendar have no holidays.
    #[must_use]
    pub fn is_holiday(&self, country: CountryId, day: DayNumber) -> bool {
        self.get(country).is_some_and(|c| c.is_holiday(day))
    }

    /// Returns the number of countries with a calendar.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    /// Returns true if no country has a calendar.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    /// Returns all countries with a calendar.
    pub fn countries(&self) -> impl Iterator<Item = CountryId> + '_ {
        self.calendars.keys().copied()
    }
}
