//! Immutable lookup tables for the transit delivery estimate engine.
//!
//! - [`NativeTables`] - Hour estimates keyed by [`transit_types::EstimateKey`], range
//!   buckets, the cascade-enabled service set, base services and per-service defaults
//! - [`HistoryTables`] - The five historical-average tables
//!
//! Tables are assembled once from row records and never mutated afterwards.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod history;
mod native;

pub use history::{HistoryTable, HistoryTables};
pub use native::{
    EXCLUDED_RANGE_ZIPS, MAX_RANGE_WIDTH, NativeTableSizes, NativeTables, NativeTablesBuilder,
    ServiceInfo,
};
