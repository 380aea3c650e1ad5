//! Holiday-aware business-day calendar for the transit delivery estimate engine.
//!
//! - [`HolidayCalendar`] - One country's holidays over a fixed 915-day window
//! - [`HolidayCalendars`] - Calendars keyed by country
//! - [`WorkingDays`] - Weekday mask of a shipping service's working days

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod calendar;
mod working_days;

pub use calendar::{DEFAULT_MAX_PROBE, HolidayCalendar, HolidayCalendars, WINDOW_DAYS};
pub use working_days::WorkingDays;
