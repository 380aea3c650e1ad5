//! Delivery estimates from postal-code tables, holiday calendars and an
//! analytical model.
//!
//! This is a facade crate that re-exports functionality from the transit
//! workspace crates for convenient access.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use transit_types::*;

// Re-export calendars
pub use transit_calendar::{
    DEFAULT_MAX_PROBE, HolidayCalendar, HolidayCalendars, WINDOW_DAYS, WorkingDays,
};

// Re-export table files
pub use transit_format::{
    FormatError, Record, TableFormat, read_records, read_records_from, records, write_records,
    write_records_to,
};

// Re-export tables and resolution
pub use transit_resolve::{
    CascadeResolver, CascadeStage, NativeEstimate, NativeEstimator, NativeQuery, NativeSource,
};
pub use transit_tables::{HistoryTable, HistoryTables, NativeTableSizes, NativeTables};

// Re-export the analytical estimator
#[cfg(feature = "analytical")]
pub use transit_analytical::{
    AnalyticalEstimator, AnalyticalModel, AnalyticalOutcome, AnalyticalPath, AnalyticalQuery,
    Feature, FeatureVector, ModelSelection, ModelVariant, QaTable, Scorer, ScorerConfig,
    ThresholdError, ThresholdModel,
};

// Re-export the engine
#[cfg(feature = "engine")]
pub use transit_engine::{
    AnalyticalStage, Baseline, ConfigError, EligibilityPredicate, EligibilityQuery, Engine,
    EngineConfig, EngineSlot, EngineStats, EstimateReport, EstimateRequest, Gate, GateInput,
    LoadError, OptOutSet, Route, RuleEligibility, StatsSnapshot,
};

/// Prelude module for convenient imports.
///
/// ```
/// use transit_lib::prelude::*;
/// ```
pub mod prelude {
    pub use transit_types::{
        CountryId, DeliveryEstimate, OrderTime, PostalCode, Result, ServiceEstimate, ServiceId,
        TransitError,
    };

    pub use transit_calendar::{HolidayCalendars, WorkingDays};
    pub use transit_format::TableFormat;
    pub use transit_resolve::{CascadeResolver, NativeEstimator, NativeQuery};
    pub use transit_tables::NativeTables;

    #[cfg(feature = "analytical")]
    pub use transit_analytical::{AnalyticalEstimator, ModelSelection};

    #[cfg(feature = "engine")]
    pub use transit_engine::{Engine, EngineConfig, EngineSlot, EstimateRequest};
}
