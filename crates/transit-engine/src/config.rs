//! Engine configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use transit_analytical::{DEFAULT_MAX_DAYS_PREDICTED, DEFAULT_MIN_DAYS_PREDICTED, ScorerConfig};
use transit_format::TableFormat;
use transit_types::CountryId;

use crate::RuleEligibility;

/// Errors that can occur while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A category opt-out entry is not a seller id mapped to category ids.
    #[error("Invalid category opt-out '{seller}': '{categories}'")]
    InvalidOptOut {
        /// The seller key.
        seller: String,
        /// The category list.
        categories: String,
    },

    /// The experiment model is enabled without a configuration.
    #[error("analytical.experiment_enabled is set but analytical.experiment_model is missing")]
    MissingExperimentModel,
}

/// Paths of the native tables and the holiday calendar.
///
/// A table without a path loads empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePaths {
    /// Per-service defaults and working days.
    pub service_info: Option<PathBuf>,
    /// Cross-border country-pair estimates.
    pub country_pairs: Option<PathBuf>,
    /// Cascade-enabled (origin, destination, service) triples.
    pub cascade_services: Option<PathBuf>,
    /// Exact zip-pair estimates.
    pub zip_pairs: Option<PathBuf>,
    /// Postal code ranges forming buckets.
    pub zip_ranges: Option<PathBuf>,
    /// Bucket-pair estimates.
    pub range_estimates: Option<PathBuf>,
    /// Origin-only estimates.
    pub origin_zips: Option<PathBuf>,
    /// Exclusion-zone estimates.
    pub exclusions: Option<PathBuf>,
    /// Base-service mappings.
    pub base_services: Option<PathBuf>,
    /// Holidays per country.
    pub holidays: Option<PathBuf>,
}

impl TablePaths {
    fn paths_mut(&mut self) -> [&mut Option<PathBuf>; 10] {
        [
            &mut self.service_info,
            &mut self.country_pairs,
            &mut self.cascade_services,
            &mut self.zip_pairs,
            &mut self.zip_ranges,
            &mut self.range_estimates,
            &mut self.origin_zips,
            &mut self.exclusions,
            &mut self.base_services,
            &mut self.holidays,
        ]
    }
}

/// Native estimator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Whether the engine computes native estimates itself.
    pub enabled: bool,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// One analytical model: history tables and thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Seller history table.
    pub seller_history: Option<PathBuf>,
    /// Leaf category history table.
    pub category_history: Option<PathBuf>,
    /// Shipping method history table.
    pub shipment_history: Option<PathBuf>,
    /// Zip pair history table.
    pub zip_history: Option<PathBuf>,
    /// Shipping method and zip pair history table.
    pub shipment_zip_history: Option<PathBuf>,
    /// Comma-separated score cut-points indexed by day.
    pub thresholds: String,
    /// Lowest day considered.
    pub min_days_predicted: usize,
    /// Highest day considered.
    pub max_days_predicted: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seller_history: None,
            category_history: None,
            shipment_history: None,
            zip_history: None,
            shipment_zip_history: None,
            thresholds: String::new(),
            min_days_predicted: DEFAULT_MIN_DAYS_PREDICTED,
            max_days_predicted: DEFAULT_MAX_DAYS_PREDICTED,
        }
    }
}

impl ModelConfig {
    fn paths_mut(&mut self) -> [&mut Option<PathBuf>; 5] {
        [
            &mut self.seller_history,
            &mut self.category_history,
            &mut self.shipment_history,
            &mut self.zip_history,
            &mut self.shipment_zip_history,
        ]
    }
}

/// Analytical estimator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticalConfig {
    /// Whether the analytical path runs at all.
    pub enabled: bool,
    /// Destination country served by the analytical model.
    pub country: CountryId,
    /// Whether the experiment model is loaded.
    pub experiment_enabled: bool,
    /// The default model.
    pub default_model: ModelConfig,
    /// The experiment model.
    pub experiment_model: Option<ModelConfig>,
    /// Seller id to comma-separated category ids; keys starting with `#` are comments.
    pub category_opt_outs: BTreeMap<String, String>,
    /// Delegated eligibility rules.
    pub eligibility: RuleEligibility,
    /// Scoring function.
    pub scorer: ScorerConfig,
}

impl Default for AnalyticalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            country: CountryId::UNITED_STATES,
            experiment_enabled: false,
            default_model: ModelConfig::default(),
            experiment_model: None,
            category_opt_outs: BTreeMap::new(),
            eligibility: RuleEligibility::default(),
            scorer: ScorerConfig::default(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layout of every table file.
    pub format: TableFormat,
    /// Build day of the holiday calendars; defaults to today.
    pub calendar_anchor: Option<NaiveDate>,
    /// Native and calendar table paths.
    pub tables: TablePaths,
    /// Native estimator settings.
    pub native: NativeConfig,
    /// Analytical estimator settings.
    pub analytical: AnalyticalConfig,
}

impl EngineConfig {
    /// Reads a configuration file, resolving relative paths against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolved_against(base))
    }

    /// Makes every relative table path relative to `base`.
    #[must_use]
    pub fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |slot: &mut Option<PathBuf>| {
            if let Some(path) = slot.as_mut().filter(|p| p.is_relative()) {
                *path = base.join(&*path);
            }
        };
        self.tables.paths_mut().into_iter().for_each(resolve);
        self.analytical
            .default_model
            .paths_mut()
            .into_iter()
            .for_each(resolve);
        if let Some(model) = self.analytical.experiment_model.as_mut() {
            model.paths_mut().into_iter().for_each(resolve);
        }
        self
    }

    /// Returns the experiment model configuration if it should be loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the experiment is enabled without a model.
    pub fn experiment_model(&self) -> Result<Option<&ModelConfig>, ConfigError> {
        if !self.analytical.experiment_enabled {
            return Ok(None);
        }
        self.analytical
            .experiment_model
            .as_ref()
            .map(Some)
            .ok_or(ConfigError::MissingExperimentModel)
    }
}
