//! Analytical feature and threshold delivery estimator.
//!
//! - [`FeatureVector`] - The fixed feature layout, indexed by [`Feature`]
//! - [`Scorer`] - Maps features to a score ([`ConstantScorer`], [`LinearScorer`], closures)
//! - [`ThresholdModel`] - Buckets a score into a day count
//! - [`ModelSelection`] - Per-request model choice parsed from the selection token
//! - [`QaTable`] - Deterministic lookups for end-to-end testing
//! - [`AnalyticalEstimator`] - Ties the above together

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod estimator;
mod features;
mod qa;
mod scorer;
mod selection;
mod threshold;

pub use estimator::{
    AnalyticalEstimator, AnalyticalModel, AnalyticalOutcome, AnalyticalPath, AnalyticalQuery,
};
pub use features::{Feature, FeatureVector};
pub use qa::{QaKey, QaTable};
pub use scorer::{ConstantScorer, DEFAULT_SCORE, LinearScorer, Scorer, ScorerConfig};
pub use selection::{ModelSelection, ModelVariant};
pub use threshold::{
    DEFAULT_MAX_DAYS_PREDICTED, DEFAULT_MIN_DAYS_PREDICTED, ThresholdError, ThresholdModel,
};
