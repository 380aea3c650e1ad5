//! Feature assembly, scoring and bucketing.

use transit_calendar::{DEFAULT_MAX_PROBE, HolidayCalendars, WorkingDays};
use transit_tables::HistoryTables;
use transit_types::{
    BIG_ORIGIN_MAX_LEN, CountryId, DeliveryEstimate, HistoricalAverages, OrderTime, PostalCode,
    PostalRadix, ServiceId,
};

use crate::{
    Feature, FeatureVector, ModelSelection, ModelVariant, QaKey, QaTable, Scorer, ThresholdModel,
};

/// Request inputs of the analytical estimator.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticalQuery<'a> {
    /// Seller's country.
    pub origin_country: CountryId,
    /// Buyer's country.
    pub dest_country: CountryId,
    /// Raw origin postal code.
    pub origin_zip: Option<&'a str>,
    /// Pre-parsed destination postal code.
    pub dest_zip: i32,
    /// Service of the native estimate.
    pub service: ServiceId,
    /// Working days of that service.
    pub working_days: WorkingDays,
    /// Handling time in days, already normalized.
    pub handling_days: i32,
    /// Item price in cents.
    pub item_price: i64,
    /// Calculated shipping price in cents, if the calculator succeeded.
    pub shipping_price: Option<i64>,
    /// Order or payment time.
    pub order_time: Option<OrderTime>,
    /// Origin to destination distance in miles.
    pub distance_miles: i64,
    /// Seller id.
    pub seller_id: i64,
    /// Leaf category of the listing.
    pub leaf_category: Option<i64>,
}

/// A trained model: threshold cut-points plus its historical tables.
#[derive(Debug, Clone, Default)]
pub struct AnalyticalModel {
    /// Score to day bucketing.
    pub thresholds: ThresholdModel,
    /// Historical averages used as features.
    pub history: HistoryTables,
}

/// Price used when the shipping calculator reported an error.
const UNKNOWN_SHIPPING_PRICE: i64 = 1;

const fn whole_units(cents: i64) -> f64 {
    (cents.saturating_add(99) / 100) as f64
}

/// Miles to 55 km buckets, rounded to the nearest bucket.
const fn distance_bucket(miles: i64) -> i64 {
    miles.saturating_mul(1609).saturating_add(27_500) / 55_000
}

fn set_averages(
    features: &mut FeatureVector,
    total: Feature,
    day: Feature,
    averages: Option<&HistoricalAverages>,
    weekday: i64,
) {
    let (total_value, day_value) = averages.map_or(
        (FeatureVector::MISSING, FeatureVector::MISSING),
        |averages| (f64::from(averages.total()), f64::from(averages.day(weekday))),
    );
    features.set(total, total_value);
    features.set(day, day_value);
}

impl AnalyticalModel {
    /// Assembles the feature vector of a request.
    #[must_use]
    pub fn features(
        &self,
        query: &AnalyticalQuery<'_>,
        calendars: &HolidayCalendars,
    ) -> FeatureVector {
        let mut features = FeatureVector::zeroed();

        let mut weekday = 0;
        if let Some(time) = query.order_time {
            weekday = i64::from(time.day_of_week());
            features.set(Feature::HourOfDay, time.hour_of_day() as f64);
            features.set(Feature::DayOfWeek, weekday as f64);
            features.set(Feature::MonthOfYear, f64::from(time.month_of_year()));
            if let Some(calendar) = calendars.get(query.origin_country) {
                let (distance, _) = calendar.distance_to_next_working_day(
                    time.day,
                    query.working_days,
                    DEFAULT_MAX_PROBE,
                );
                features.set(Feature::DaysFromNonworkingDay, f64::from(distance));
                features.set(
                    Feature::IsPaymentOnHoliday,
                    f64::from(u8::from(calendar.is_holiday(time.day))),
                );
            }
        }

        let origin = PostalCode::origin(query.origin_zip, query.origin_country).map(|c| c.value());
        let dest = if query.dest_zip == 0 {
            0
        } else {
            PostalCode::canonical_destination(query.dest_zip, query.dest_country).value()
        };
        let origin_key = origin.unwrap_or(-1);

        let shipping_price = query.shipping_price.unwrap_or(UNKNOWN_SHIPPING_PRICE);
        features.set(Feature::ShippingFee, whole_units(shipping_price));
        features.set(Feature::ItemPrice, whole_units(query.item_price));
        features.set(
            Feature::Distance,
            origin.map_or(-1, |_| distance_bucket(query.distance_miles)) as f64,
        );
        features.set(Feature::HandlingDays, f64::from(query.handling_days));

        let history = &self.history;
        let service = query.service.get();
        set_averages(
            &mut features,
            Feature::SellerTotalAverage,
            Feature::SellerDayAverage,
            history.sellers.get(&query.seller_id),
            weekday,
        );
        set_averages(
            &mut features,
            Feature::CategoryTotalAverage,
            Feature::CategoryDayAverage,
            query
                .leaf_category
                .and_then(|category| history.categories.get(&category)),
            weekday,
        );
        set_averages(
            &mut features,
            Feature::ShippingMethodTotalAverage,
            Feature::ShippingMethodDayAverage,
            history.shipping_methods.get(&service),
            weekday,
        );
        set_averages(
            &mut features,
            Feature::ZipTotalAverage,
            Feature::ZipDayAverage,
            history.zip_pairs.get(&(origin_key, dest)),
            weekday,
        );
        set_averages(
            &mut features,
            Feature::ShippingMethodZipTotalAverage,
            Feature::ShippingMethodZipDayAverage,
            history.method_zip_pairs.get(&(service, origin_key, dest)),
            weekday,
        );
        features
    }
}

/// How the analytical estimator answered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticalPath {
    /// The QA lookup table.
    Qa,
    /// A scored model.
    Model(ModelVariant),
}

/// Result of an analytical estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticalOutcome {
    /// Path taken.
    pub path: AnalyticalPath,
    /// Model score, when a model ran.
    pub score: Option<f64>,
    /// The estimate; `None` means the caller keeps its native estimate.
    pub estimate: Option<DeliveryEstimate>,
}

/// Scores requests with a default and an optional experiment model.
pub struct AnalyticalEstimator {
    default: AnalyticalModel,
    experiment: Option<AnalyticalModel>,
    scorer: Box<dyn Scorer>,
}

impl std::fmt::Debug for AnalyticalEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticalEstimator")
            .field("default", &self.default)
            .field("experiment", &self.experiment)
            .finish_non_exhaustive()
    }
}

impl AnalyticalEstimator {
    /// Creates an estimator with only the default model.
    #[must_use]
    pub fn new(default: AnalyticalModel, scorer: Box<dyn Scorer>) -> Self {
        Self {
            default,
            experiment: None,
            scorer,
        }
    }

    /// Adds the experiment model.
    #[must_use]
    pub fn with_experiment(mut self, experiment: AnalyticalModel) -> Self {
        self.experiment = Some(experiment);
        self
    }

    /// Returns the default model.
    #[must_use]
    pub const fn default_model(&self) -> &AnalyticalModel {
        &self.default
    }

    /// Returns the experiment model, if loaded.
    #[must_use]
    pub const fn experiment_model(&self) -> Option<&AnalyticalModel> {
        self.experiment.as_ref()
    }

    /// Returns the model serving a variant; the experiment falls back to
    /// the default model when it is not loaded.
    #[must_use]
    pub fn model(&self, variant: ModelVariant) -> (ModelVariant, &AnalyticalModel) {
        match (variant, &self.experiment) {
            (ModelVariant::Experiment, Some(model)) => (ModelVariant::Experiment, model),
            _ => (ModelVariant::Default, &self.default),
        }
    }

    /// Looks a request up in the QA table; a miss is [`DeliveryEstimate::NONE`].
    #[must_use]
    pub fn qa_estimate(query: &AnalyticalQuery<'_>) -> DeliveryEstimate {
        let key = QaKey {
            category: query
                .leaf_category
                .and_then(|category| i32::try_from(category).ok())
                .unwrap_or(0),
            service: query.service.get(),
            origin_zip: query
                .origin_zip
                .and_then(|raw| PostalCode::parse(raw, PostalRadix::Decimal, BIG_ORIGIN_MAX_LEN))
                .map_or(0, |code| code.value()),
            dest_zip: query.dest_zip,
        };
        QaTable::global()
            .lookup(&key)
            .map_or(DeliveryEstimate::NONE, DeliveryEstimate::point)
    }

    /// Estimates delivery days for a request.
    #[must_use]
    pub fn estimate(
        &self,
        query: &AnalyticalQuery<'_>,
        selection: ModelSelection,
        calendars: &HolidayCalendars,
    ) -> AnalyticalOutcome {
        let Some(requested) = selection.variant() else {
            return AnalyticalOutcome {
                path: AnalyticalPath::Qa,
                score: None,
                estimate: Some(Self::qa_estimate(query)),
            };
        };

        let (variant, model) = self.model(requested);
        let features = model.features(query, calendars);
        let score = self.scorer.score(&features);
        let day = model.thresholds.bucket(score, selection.day_cap());
        tracing::trace!(%variant, score, ?day, "Analytical score");

        AnalyticalOutcome {
            path: AnalyticalPath::Model(variant),
            score: Some(score),
            estimate: day.map(|day| DeliveryEstimate::point(day as i64)),
        }
    }
}
