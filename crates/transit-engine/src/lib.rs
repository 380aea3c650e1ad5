//! Delivery estimate engine for transit.
//!
//! This crate provides:
//!
//! - [`EngineConfig`] - JSON configuration with paths relative to the config file
//! - [`Engine`] - Immutable table set answering [`EstimateRequest`]s
//! - [`Gate`] - Analytical eligibility and routing
//! - [`EngineSlot`] - Atomic install, swap and teardown of the current engine
//! - [`EngineStats`] - Lock-free usage counters

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod eligibility;
mod engine;
mod loader;
mod optout;
mod request;
mod slot;
mod stats;

pub use config::{
    AnalyticalConfig, ConfigError, EngineConfig, ModelConfig, NativeConfig, TablePaths,
};
pub use eligibility::{
    EligibilityPredicate, EligibilityQuery, Gate, GateInput, Route, RuleEligibility,
};
pub use engine::{AnalyticalStage, Engine, EstimateReport};
pub use loader::LoadError;
pub use optout::OptOutSet;
pub use request::{Baseline, EstimateRequest};
pub use slot::EngineSlot;
pub use stats::{EngineStats, StatsSnapshot};
