//! Calendar command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use transit_lib::{CountryId, DEFAULT_MAX_PROBE, HolidayCalendar, WorkingDays, date_of, parse_day};

/// Show whether a day is a holiday and how far the next working day is.
pub(crate) fn calendar(config: &Path, country: &str, date: &str, working_days: u8) -> Result<()> {
    let country: CountryId = country.parse()?;
    let day = parse_day(date)?;
    let working_days = WorkingDays(working_days);
    let engine = super::load_engine(config)?;

    let calendar = engine
        .calendars()
        .get(country)
        .cloned()
        .unwrap_or_else(|| {
            tracing::warn!(%country, "No holidays loaded for country");
            HolidayCalendar::anchored_at(day)
        });

    let (distance, found) =
        calendar.distance_to_next_working_day(day, working_days, DEFAULT_MAX_PROBE);
    let window_start = date_of(calendar.start_day()).context("Calendar window out of range")?;

    println!("Country:      {country}");
    println!("Date:         {date}");
    println!("Window from:  {}", window_start.format("%Y-%m-%d"));
    println!("Holiday:      {}", calendar.is_holiday(day));
    println!("Working day:  {}", calendar.is_working_day(day, working_days));
    if found {
        println!("Next working: in {distance} day(s)");
    } else {
        println!("Next working: none within {DEFAULT_MAX_PROBE} days");
    }

    Ok(())
}
