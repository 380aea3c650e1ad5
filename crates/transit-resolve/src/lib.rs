//! Cascading native delivery estimate resolver.
//!
//! - [`CascadeResolver`] - Priority-ordered postal-code cascade over [`NativeTables`]
//! - [`NativeEstimator`] - Rule-based estimate: service selection, cascade, cross-border
//!   and per-service fallbacks, hours to days
//!
//! [`NativeTables`]: transit_tables::NativeTables

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cascade;
mod native;

#[cfg(test)]
mod fixtures;

pub use cascade::{CascadeResolver, CascadeStage};
pub use native::{NativeEstimate, NativeEstimator, NativeQuery, NativeSource};
