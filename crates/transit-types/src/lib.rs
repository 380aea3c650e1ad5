//! Core types for the transit delivery estimate engine.
//!
//! This crate provides the fundamental data structures used throughout transit:
//!
//! - [`CountryId`] / [`ServiceId`] - Marketplace country and shipping service identifiers
//! - [`ServiceEstimate`] - Hour-based delivery bounds for a shipping service
//! - [`DeliveryEstimate`] - Day-based delivery bounds returned to callers
//! - [`DayNumber`] - Julian day numbers with day-of-week and month helpers
//! - [`PostalCode`] - Normalized, prefix-truncatable postal codes
//! - [`EstimateKey`] - Tagged composite keys shared by the estimate tables
//! - [`HistoricalAverages`] - All-time and per-weekday delivery averages

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod day;
mod error;
mod estimate;
mod history;
mod ids;
mod keys;
mod postal;

pub use day::{
    DayNumber, OrderTime, SECONDS_PER_DAY, SECONDS_PER_HOUR, date_of, day_number, day_of_week,
    month_of_year, parse_day,
};
pub use error::{Result, TransitError};
pub use estimate::{DeliveryEstimate, ServiceEstimate, normalize_handling_days};
pub use history::HistoricalAverages;
pub use ids::{CountryId, ServiceId};
pub use keys::{EstimateKey, RangeKey, ServiceCountryKey, ServicePairKey};
pub use postal::{
    BIG_ORIGIN_MAX_LEN, ORIGIN_MAX_LEN, ORIGIN_SHORT_LEN, PostalCode, PostalRadix, Prefixes,
    Truncatable,
};
