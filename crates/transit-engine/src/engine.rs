//! Per-request orchestration.

use transit_analytical::{
    AnalyticalEstimator, AnalyticalOutcome, AnalyticalPath, AnalyticalQuery, ModelSelection,
    ModelVariant,
};
use transit_calendar::HolidayCalendars;
use transit_resolve::{CascadeResolver, NativeEstimate, NativeEstimator, NativeQuery};
use transit_tables::NativeTables;
use transit_types::{CountryId, DeliveryEstimate, PostalCode, normalize_handling_days};

use crate::{
    Baseline, EligibilityPredicate, EligibilityQuery, EngineStats, EstimateRequest, Gate,
    GateInput, OptOutSet, Route,
};

/// Everything the analytical path needs.
pub struct AnalyticalStage {
    /// Model scoring.
    pub estimator: AnalyticalEstimator,
    /// Seller and category opt-outs.
    pub opt_outs: OptOutSet,
    /// Delegated eligibility predicate.
    pub eligibility: Box<dyn EligibilityPredicate>,
    /// Destination country served by the model.
    pub country: CountryId,
}

impl std::fmt::Debug for AnalyticalStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticalStage")
            .field("estimator", &self.estimator)
            .field("opt_outs", &self.opt_outs)
            .field("country", &self.country)
            .finish_non_exhaustive()
    }
}

/// How a request was answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateReport {
    /// The native estimate used as baseline, if any.
    pub baseline: Option<Baseline>,
    /// Path chosen by the gate.
    pub route: Route,
    /// Analytical outcome, when that path ran.
    pub analytical: Option<AnalyticalOutcome>,
    /// Final estimate.
    pub estimate: DeliveryEstimate,
}

/// An immutable, fully loaded estimate engine.
#[derive(Debug)]
pub struct Engine {
    tables: NativeTables,
    calendars: HolidayCalendars,
    native_enabled: bool,
    analytical: Option<AnalyticalStage>,
    stats: EngineStats,
}

impl Engine {
    /// Creates an engine computing native estimates only.
    #[must_use]
    pub fn new(tables: NativeTables, calendars: HolidayCalendars) -> Self {
        Self {
            tables,
            calendars,
            native_enabled: true,
            analytical: None,
            stats: EngineStats::default(),
        }
    }

    /// Enables or disables the built-in native estimator.
    ///
    /// When disabled, requests must carry a [`Baseline`].
    #[must_use]
    pub const fn with_native(mut self, enabled: bool) -> Self {
        self.native_enabled = enabled;
        self
    }

    /// Enables the analytical path.
    #[must_use]
    pub fn with_analytical(mut self, stage: AnalyticalStage) -> Self {
        self.analytical = Some(stage);
        self
    }

    /// Returns the native tables.
    #[must_use]
    pub const fn tables(&self) -> &NativeTables {
        &self.tables
    }

    /// Returns the holiday calendars.
    #[must_use]
    pub const fn calendars(&self) -> &HolidayCalendars {
        &self.calendars
    }

    /// Returns the analytical stage, if enabled.
    #[must_use]
    pub const fn analytical(&self) -> Option<&AnalyticalStage> {
        self.analytical.as_ref()
    }

    /// Returns the usage counters.
    #[must_use]
    pub const fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Estimates delivery days; `DeliveryEstimate::NONE` when nothing applies.
    #[must_use]
    pub fn estimate(&self, request: &EstimateRequest) -> DeliveryEstimate {
        self.estimate_report(request).estimate
    }

    /// Estimates delivery days, reporting the path taken.
    #[must_use]
    pub fn estimate_report(&self, request: &EstimateRequest) -> EstimateReport {
        self.stats.record_request();
        let handling_days = normalize_handling_days(request.handling_days);
        let baseline = request.baseline.or_else(|| self.native_baseline(request));
        let native = baseline.map_or(DeliveryEstimate::NONE, |b| b.estimate);

        let mut report = EstimateReport {
            baseline,
            route: Route::Native,
            analytical: None,
            estimate: native,
        };
        let (Some(stage), Some(baseline)) = (&self.analytical, baseline) else {
            return report;
        };

        let input = GateInput {
            query: EligibilityQuery {
                origin_country: request.origin_country,
                dest_country: request.dest_country,
                dest_region: request.dest_region,
                dest_zip: request.dest_zip,
                handling_days,
                site: request.site,
            },
            baseline: baseline.estimate,
            opt_out: request.opt_out,
            seller_id: request.seller_id,
            category: request.categories.first().copied(),
        };
        report.route = Gate::new(stage.eligibility.as_ref(), &stage.opt_outs, stage.country)
            .route(&input);
        tracing::debug!(route = %report.route, seller = request.seller_id, "Gate decision");

        match report.route {
            Route::Native => {}
            Route::Cascade => {
                if let Some(estimate) = self.cascade_estimate(request, &baseline, handling_days) {
                    self.stats.record_cascade_result();
                    report.estimate = estimate;
                }
            }
            Route::Analytical => {
                let outcome = self.analytical_estimate(stage, request, &baseline, handling_days);
                if let Some(estimate) = outcome.estimate {
                    report.estimate = estimate;
                }
                report.analytical = Some(outcome);
            }
        }
        report
    }

    fn native_baseline(&self, request: &EstimateRequest) -> Option<Baseline> {
        if !self.native_enabled {
            return None;
        }
        let query = NativeQuery {
            origin_country: request.origin_country,
            dest_country: request.dest_country,
            origin_zip: request.origin_zip.as_deref(),
            dest_zip: request.dest_zip,
            calculated_service: request.calculated_service,
            services: &request.services,
            handling_days: request.handling_days,
        };
        NativeEstimator::new(&self.tables)
            .estimate(&query)
            .map(|native: NativeEstimate| Baseline {
                service: native.service,
                working_days: native.working_days,
                estimate: native.estimate,
            })
    }

    /// Same-country cascade on the base service with short origin codes.
    fn cascade_estimate(
        &self,
        request: &EstimateRequest,
        baseline: &Baseline,
        handling_days: i32,
    ) -> Option<DeliveryEstimate> {
        let country = request.origin_country;
        if country != request.dest_country || !country.is_known() || request.dest_zip == 0 {
            return None;
        }
        let base_service = self.tables.base_service(country, baseline.service)?;
        let origin = PostalCode::origin(request.origin_zip.as_deref(), country)
            .filter(|code| code.value() != 0)?;
        let dest = PostalCode::canonical_destination(request.dest_zip, country);
        CascadeResolver::new(&self.tables)
            .resolve(base_service, country, origin, country, dest)
            .map(|hours| hours.to_days(handling_days))
    }

    fn analytical_estimate(
        &self,
        stage: &AnalyticalStage,
        request: &EstimateRequest,
        baseline: &Baseline,
        handling_days: i32,
    ) -> AnalyticalOutcome {
        let query = AnalyticalQuery {
            origin_country: request.origin_country,
            dest_country: request.dest_country,
            origin_zip: request.origin_zip.as_deref(),
            dest_zip: request.dest_zip,
            service: baseline.service,
            working_days: baseline.working_days,
            handling_days,
            item_price: request.item_price,
            shipping_price: request.shipping_price,
            order_time: request.order_time,
            distance_miles: request.distance_miles,
            seller_id: request.seller_id,
            leaf_category: request.leaf_categories.first().copied(),
        };
        let selection = ModelSelection::parse(request.model.as_deref());
        let outcome = stage.estimator.estimate(&query, selection, &self.calendars);

        match outcome.path {
            AnalyticalPath::Qa => self.stats.record_qa_lookup(),
            AnalyticalPath::Model(ModelVariant::Default) => self.stats.record_default_model(),
            AnalyticalPath::Model(ModelVariant::Experiment) => {
                self.stats.record_experiment_model();
            }
        }
        if matches!(outcome.path, AnalyticalPath::Model(_)) && outcome.estimate.is_some() {
            self.stats.record_model_result();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_analytical::{AnalyticalModel, FeatureVector, ThresholdModel};
    use transit_calendar::WorkingDays;
    use transit_format::records::{
        BaseServiceRow, RangeEstimateRow, ServiceInfoRow, ServicePairRow, ZipField, ZipPairRow,
        ZipRangeRow,
    };
    use chrono::NaiveDate;
    use transit_types::{OrderTime, ServiceEstimate, ServiceId, day_number};

    use crate::RuleEligibility;

    const US: CountryId = CountryId::UNITED_STATES;
    const AU: CountryId = CountryId::AUSTRALIA;
    const SERVICE: ServiceId = ServiceId(1);
    const AU_SERVICE: ServiceId = ServiceId(7001);
    const AU_BASE: ServiceId = ServiceId(7000);

    fn tables() -> NativeTables {
        NativeTables::builder()
            .with_service_info(vec![
                ServiceInfoRow {
                    service: SERVICE,
                    min_hours: 48,
                    max_hours: 96,
                    working_days: 0x3E,
                },
                ServiceInfoRow {
                    service: AU_SERVICE,
                    min_hours: 72,
                    max_hours: 144,
                    working_days: 0x3E,
                },
            ])
            .with_cascade_services(vec![
                ServicePairRow {
                    origin_country: AU,
                    dest_country: AU,
                    service: AU_BASE,
                },
                ServicePairRow {
                    origin_country: US,
                    dest_country: US,
                    service: SERVICE,
                },
            ])
            .with_zip_pairs(vec![ZipPairRow {
                service: SERVICE,
                origin_country: US,
                dest_country: US,
                origin_zip: ZipField::Code(95125),
                dest_zip: ZipField::Code(10001),
                estimate: ServiceEstimate::new(24, 72),
            }])
            .with_zip_ranges(vec![
                ZipRangeRow {
                    country: AU,
                    start: ZipField::Code(2000),
                    end: ZipField::Code(2999),
                },
                ZipRangeRow {
                    country: AU,
                    start: ZipField::Code(3000),
                    end: ZipField::Code(3999),
                },
            ])
            .with_range_estimates(vec![RangeEstimateRow {
                service: AU_BASE,
                origin_country: AU,
                dest_country: AU,
                origin_bucket: ZipField::Code(2000),
                dest_bucket: ZipField::Code(3000),
                estimate: ServiceEstimate::new(24, 48),
            }])
            .with_base_services(vec![BaseServiceRow {
                country: AU,
                service: AU_SERVICE,
                base_service: AU_BASE,
            }])
            .build()
    }

    fn engine(opt_outs: OptOutSet, score: f64) -> Engine {
        let model = AnalyticalModel {
            thresholds: ThresholdModel::parse("0,1,2,3,4,5,6,7", 2, 7).unwrap(),
            ..AnalyticalModel::default()
        };
        let estimator = AnalyticalEstimator::new(model, Box::new(move |_: &FeatureVector| score));
        Engine::new(tables(), HolidayCalendars::new()).with_analytical(AnalyticalStage {
            estimator,
            opt_outs,
            eligibility: Box::new(RuleEligibility::default()),
            country: US,
        })
    }

    fn us_request() -> EstimateRequest {
        EstimateRequest {
            origin_country: US,
            dest_country: US,
            origin_zip: Some("95125".to_string()),
            dest_zip: 10001,
            services: vec![SERVICE],
            handling_days: 1,
            seller_id: 501,
            categories: vec![20081],
            leaf_categories: vec![20081],
            ..EstimateRequest::default()
        }
    }

    #[test]
    fn test_native_only_engine() {
        let engine = Engine::new(tables(), HolidayCalendars::new());
        let report = engine.estimate_report(&us_request());
        assert_eq!(report.route, Route::Native);
        assert_eq!(report.estimate, DeliveryEstimate::new(2, 4));
        assert_eq!(report.baseline.map(|b| b.service), Some(SERVICE));
    }

    #[test]
    fn test_analytical_replaces_native() {
        let engine = engine(OptOutSet::default(), 4.5);
        let report = engine.estimate_report(&us_request());
        assert_eq!(report.route, Route::Analytical);
        assert_eq!(report.estimate, DeliveryEstimate::point(5));

        let stats = engine.stats().snapshot();
        assert_eq!(stats.requests, 1);
        assert_eq!(stats.default_model_calls, 1);
        assert_eq!(stats.model_results, 1);
    }

    #[test]
    fn test_extreme_request_values() {
        let start = day_number(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let calendars = HolidayCalendars::from_dates(
            start,
            [(US, NaiveDate::from_ymd_opt(2024, 7, 4).unwrap())],
        );
        let mut engine = engine(OptOutSet::default(), 4.5);
        engine.calendars = calendars;
        for order_time in [
            OrderTime::new(i64::MIN + 5, 0),
            OrderTime::new(i64::MAX, i64::MAX),
        ] {
            let request = EstimateRequest {
                item_price: i64::MAX,
                shipping_price: Some(i64::MIN),
                distance_miles: i64::MAX / 1000,
                order_time: Some(order_time),
                ..us_request()
            };
            assert_eq!(engine.estimate(&request), DeliveryEstimate::point(5));
        }
    }

    #[test]
    fn test_opted_out_category_keeps_native() {
        let engine = engine(OptOutSet::new([(501, 20081)]), 4.5);
        let report = engine.estimate_report(&us_request());
        assert_eq!(report.route, Route::Native);
        assert_eq!(report.estimate, DeliveryEstimate::new(2, 4));
        assert!(report.analytical.is_none());
    }

    #[test]
    fn test_unbucketed_score_keeps_native() {
        let engine = engine(OptOutSet::default(), 100.0);
        let report = engine.estimate_report(&us_request());
        assert_eq!(report.route, Route::Analytical);
        assert_eq!(report.estimate, DeliveryEstimate::new(2, 4));
        assert_eq!(engine.stats().snapshot().model_results, 0);
    }

    #[test]
    fn test_experiment_token_counts() {
        let engine = engine(OptOutSet::default(), 4.5);
        let request = EstimateRequest {
            model: Some("b".to_string()),
            ..us_request()
        };
        let report = engine.estimate_report(&request);
        // no experiment model loaded, so the default model answers
        assert_eq!(
            report.analytical.map(|a| a.path),
            Some(AnalyticalPath::Model(ModelVariant::Default))
        );
    }

    #[test]
    fn test_australia_uses_base_service_cascade() {
        let engine = engine(OptOutSet::default(), 4.5);
        let request = EstimateRequest {
            origin_country: AU,
            dest_country: AU,
            origin_zip: Some("2010".to_string()),
            dest_zip: 3121,
            services: vec![AU_SERVICE],
            handling_days: 2,
            ..EstimateRequest::default()
        };
        let report = engine.estimate_report(&request);
        assert_eq!(report.route, Route::Cascade);
        assert_eq!(report.estimate, DeliveryEstimate::new(3, 4));
        assert_eq!(engine.stats().snapshot().cascade_results, 1);
    }

    #[test]
    fn test_baseline_from_request() {
        let engine = engine(OptOutSet::default(), 4.5).with_native(false);
        let without = engine.estimate_report(&us_request());
        assert_eq!(without.estimate, DeliveryEstimate::NONE);
        assert_eq!(without.route, Route::Native);

        let request = EstimateRequest {
            baseline: Some(Baseline {
                service: SERVICE,
                working_days: WorkingDays::MONDAY_TO_FRIDAY,
                estimate: DeliveryEstimate::new(3, 6),
            }),
            ..us_request()
        };
        assert_eq!(engine.estimate(&request), DeliveryEstimate::point(5));
    }

    #[test]
    fn test_qa_token() {
        let engine = engine(OptOutSet::default(), 4.5);
        let request = EstimateRequest {
            origin_zip: Some("95126".to_string()),
            dest_zip: 10002,
            services: vec![ServiceId(7)],
            calculated_service: Some(ServiceId(7)),
            leaf_categories: vec![162_917],
            model: Some("qa".to_string()),
            baseline: Some(Baseline {
                service: ServiceId(7),
                working_days: WorkingDays::MONDAY_TO_FRIDAY,
                estimate: DeliveryEstimate::new(2, 3),
            }),
            ..us_request()
        };
        assert_eq!(engine.estimate(&request), DeliveryEstimate::point(1));
        assert_eq!(engine.stats().snapshot().qa_lookups, 1);
    }
}
