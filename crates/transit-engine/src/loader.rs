//! Builds an [`Engine`] from configuration.

use std::hash::Hash;
use std::path::Path;

use chrono::Utc;
use thiserror::Error;
use transit_analytical::{
    AnalyticalEstimator, AnalyticalModel, ModelVariant, ThresholdError, ThresholdModel,
};
use transit_calendar::{HolidayCalendar, HolidayCalendars};
use transit_format::records::{HistoryRow, HolidayRow};
use transit_format::{FormatError, Record, TableFormat, read_records};
use transit_tables::{HistoryTable, HistoryTables, NativeTables};
use transit_types::day_number;

use crate::{AnalyticalStage, ConfigError, Engine, EngineConfig, ModelConfig, OptOutSet};

/// Errors that can occur while loading an engine.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A table could not be loaded.
    #[error("Failed to load {table} table: {source}")]
    Table {
        /// Name of the table.
        table: &'static str,
        /// The underlying format error.
        source: FormatError,
    },

    /// A model's thresholds are invalid.
    #[error("Invalid thresholds for the {variant} model: {source}")]
    Thresholds {
        /// The model the thresholds belong to.
        variant: ModelVariant,
        /// The underlying threshold error.
        source: ThresholdError,
    },
}

/// Reads one table; a missing path yields no rows.
fn load_table<T: Record>(
    table: &'static str,
    path: Option<&Path>,
    format: TableFormat,
) -> Result<Vec<T>, LoadError> {
    let Some(path) = path else {
        tracing::debug!(table, "No path configured, table is empty");
        return Ok(Vec::new());
    };
    let rows: Vec<T> =
        read_records(path, format).map_err(|source| LoadError::Table { table, source })?;
    tracing::info!(table, path = %path.display(), rows = rows.len(), "Loaded table");
    Ok(rows)
}

fn load_native(config: &EngineConfig) -> Result<NativeTables, LoadError> {
    let paths = &config.tables;
    let format = config.format;
    Ok(NativeTables::builder()
        .with_service_info(load_table("service_info", paths.service_info.as_deref(), format)?)
        .with_country_pairs(load_table("country_pairs", paths.country_pairs.as_deref(), format)?)
        .with_cascade_services(load_table(
            "cascade_services",
            paths.cascade_services.as_deref(),
            format,
        )?)
        .with_zip_pairs(load_table("zip_pairs", paths.zip_pairs.as_deref(), format)?)
        .with_zip_ranges(load_table("zip_ranges", paths.zip_ranges.as_deref(), format)?)
        .with_range_estimates(load_table(
            "range_estimates",
            paths.range_estimates.as_deref(),
            format,
        )?)
        .with_origin_zips(load_table("origin_zips", paths.origin_zips.as_deref(), format)?)
        .with_exclusions(load_table("exclusions", paths.exclusions.as_deref(), format)?)
        .with_base_services(load_table("base_services", paths.base_services.as_deref(), format)?)
        .build())
}

fn load_calendars(config: &EngineConfig) -> Result<HolidayCalendars, LoadError> {
    let today = config
        .calendar_anchor
        .unwrap_or_else(|| Utc::now().date_naive());
    let start_day = HolidayCalendar::anchored_at(day_number(today)).start_day();
    let rows: Vec<HolidayRow> =
        load_table("holidays", config.tables.holidays.as_deref(), config.format)?;
    let dates = rows.into_iter().map(|row| (row.country, row.date));
    let calendars = HolidayCalendars::from_dates(start_day, dates);
    tracing::info!(%today, countries = calendars.len(), "Built holiday calendars");
    Ok(calendars)
}

fn load_history<K>(
    table: &'static str,
    path: Option<&Path>,
    format: TableFormat,
) -> Result<HistoryTable<K>, LoadError>
where
    K: Eq + Hash,
    HistoryRow<K>: Record,
{
    let rows: Vec<HistoryRow<K>> = load_table(table, path, format)?;
    Ok(rows.into_iter().collect())
}

fn load_model(
    variant: ModelVariant,
    model: &ModelConfig,
    format: TableFormat,
) -> Result<AnalyticalModel, LoadError> {
    let thresholds = ThresholdModel::parse(
        &model.thresholds,
        model.min_days_predicted,
        model.max_days_predicted,
    )
    .map_err(|source| LoadError::Thresholds { variant, source })?;

    let history = HistoryTables {
        sellers: load_history("seller_history", model.seller_history.as_deref(), format)?,
        categories: load_history("category_history", model.category_history.as_deref(), format)?,
        shipping_methods: load_history(
            "shipment_history",
            model.shipment_history.as_deref(),
            format,
        )?,
        zip_pairs: load_history("zip_history", model.zip_history.as_deref(), format)?,
        method_zip_pairs: load_history(
            "shipment_zip_history",
            model.shipment_zip_history.as_deref(),
            format,
        )?,
    };
    tracing::info!(%variant, rows = history.total_len(), "Loaded model history");
    Ok(AnalyticalModel {
        thresholds,
        history,
    })
}

fn load_analytical(config: &EngineConfig) -> Result<Option<AnalyticalStage>, LoadError> {
    let analytical = &config.analytical;
    if !analytical.enabled {
        return Ok(None);
    }
    let opt_outs = OptOutSet::from_config(&analytical.category_opt_outs)?;
    let experiment = config.experiment_model()?;

    let default = load_model(ModelVariant::Default, &analytical.default_model, config.format)?;
    let mut estimator = AnalyticalEstimator::new(default, analytical.scorer.build());
    if let Some(model) = experiment {
        estimator =
            estimator.with_experiment(load_model(ModelVariant::Experiment, model, config.format)?);
    }

    Ok(Some(AnalyticalStage {
        estimator,
        opt_outs,
        eligibility: Box::new(analytical.eligibility.clone()),
        country: analytical.country,
    }))
}

impl Engine {
    /// Loads every configured table and builds an engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any table fails to load.
    pub fn load(config: &EngineConfig) -> Result<Self, LoadError> {
        let tables = load_native(config)?;
        let calendars = load_calendars(config)?;
        let mut engine = Self::new(tables, calendars).with_native(config.native.enabled);
        if let Some(stage) = load_analytical(config)? {
            engine = engine.with_analytical(stage);
        }
        Ok(engine)
    }
}
