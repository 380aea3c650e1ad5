//! Benchmark fixtures for transit.
//!
//! Builds a synthetic engine with a few thousand zip pairs, one range table
//! and an analytical model, plus requests that exercise each route.

use chrono::NaiveDate;
use transit_lib::records::{
    BaseServiceRow, CountryPairRow, ExclusionRow, OriginZipRow, RangeEstimateRow, ServiceInfoRow,
    ServicePairRow, ZipField, ZipPairRow, ZipRangeRow,
};
use transit_lib::{
    AnalyticalEstimator, AnalyticalModel, AnalyticalStage, CountryId, Engine, EstimateRequest,
    HolidayCalendar, HolidayCalendars, NativeTables, OptOutSet, OrderTime, RuleEligibility,
    ScorerConfig, ServiceEstimate, ServiceId, ThresholdModel, day_number,
};

const US: CountryId = CountryId::UNITED_STATES;
const AU: CountryId = CountryId::AUSTRALIA;
const UK: CountryId = CountryId::UNITED_KINGDOM;

/// Domestic US service.
pub const US_SERVICE: ServiceId = ServiceId(1);
/// Australian service mapped onto [`AU_BASE_SERVICE`].
pub const AU_SERVICE: ServiceId = ServiceId(7001);
/// Australian base service.
pub const AU_BASE_SERVICE: ServiceId = ServiceId(7000);
/// Cross-border service.
pub const CROSS_BORDER_SERVICE: ServiceId = ServiceId(50_001);

/// A named benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Short label.
    pub name: &'static str,
    /// The request to estimate.
    pub request: EstimateRequest,
}

fn tables() -> NativeTables {
    let zip_pairs = (0..4000).map(|i| ZipPairRow {
        service: US_SERVICE,
        origin_country: US,
        dest_country: US,
        origin_zip: ZipField::Code(95_000 + i % 100),
        dest_zip: ZipField::Code(10_000 + i),
        estimate: ServiceEstimate::new(24, 72),
    });
    let ranges = (2..8).map(|i| ZipRangeRow {
        country: AU,
        start: ZipField::Code(i * 1000),
        end: ZipField::Code(i * 1000 + 999),
    });
    let range_estimates = (2..8).flat_map(|o: i32| {
        (2..8).map(move |d: i32| {
            let spread = 1 + o.abs_diff(d) as i16;
            RangeEstimateRow {
                service: AU_BASE_SERVICE,
                origin_country: AU,
                dest_country: AU,
                origin_bucket: ZipField::Code(o * 1000),
                dest_bucket: ZipField::Code(d * 1000),
                estimate: ServiceEstimate::new(24 * spread, 48 * spread),
            }
        })
    });

    NativeTables::builder()
        .with_service_info([
            ServiceInfoRow {
                service: US_SERVICE,
                min_hours: 48,
                max_hours: 120,
                working_days: 0x3E,
            },
            ServiceInfoRow {
                service: AU_SERVICE,
                min_hours: 72,
                max_hours: 144,
                working_days: 0x3E,
            },
        ])
        .with_country_pairs([CountryPairRow {
            service: CROSS_BORDER_SERVICE,
            origin_country: UK,
            dest_country: US,
            estimate: ServiceEstimate::new(120, 240),
        }])
        .with_cascade_services([
            ServicePairRow {
                origin_country: US,
                dest_country: US,
                service: US_SERVICE,
            },
            ServicePairRow {
                origin_country: AU,
                dest_country: AU,
                service: AU_BASE_SERVICE,
            },
        ])
        .with_zip_pairs(zip_pairs)
        .with_zip_ranges(ranges)
        .with_range_estimates(range_estimates)
        .with_origin_zips([OriginZipRow {
            service: US_SERVICE,
            origin_country: US,
            dest_country: US,
            origin_zip: ZipField::Code(606),
            estimate: ServiceEstimate::new(48, 96),
        }])
        .with_exclusions([ExclusionRow {
            service: US_SERVICE,
            dest_country: US,
            dest_zip: ZipField::Code(99),
            estimate: ServiceEstimate::new(120, 240),
        }])
        .with_base_services([BaseServiceRow {
            country: AU,
            service: AU_SERVICE,
            base_service: AU_BASE_SERVICE,
        }])
        .build()
}

fn calendars(anchor: NaiveDate) -> HolidayCalendars {
    let start = HolidayCalendar::anchored_at(day_number(anchor)).start_day();
    let holidays = [(2024, 1, 1), (2024, 5, 27), (2024, 7, 4), (2024, 9, 2), (2024, 12, 25)]
        .into_iter()
        .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .map(|date| (US, date));
    HolidayCalendars::from_dates(start, holidays)
}

/// Builds the benchmark engine.
///
/// # Panics
///
/// Panics if the built-in thresholds fail to parse.
pub fn engine() -> Engine {
    let anchor = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default();
    let model = AnalyticalModel {
        thresholds: ThresholdModel::parse("0,0,4,6,8,10,12,14", 2, 7)
            .unwrap_or_else(|err| panic!("benchmark thresholds: {err}")),
        ..AnalyticalModel::default()
    };
    let estimator = AnalyticalEstimator::new(model, ScorerConfig::default().build());
    Engine::new(tables(), calendars(anchor)).with_analytical(AnalyticalStage {
        estimator,
        opt_outs: OptOutSet::new([(501, 20081)]),
        eligibility: Box::new(RuleEligibility::default()),
        country: US,
    })
}

/// Requests covering every route.
pub fn scenarios() -> Vec<Scenario> {
    let order_day = NaiveDate::from_ymd_opt(2024, 7, 3).map_or(0, day_number);
    let us = EstimateRequest {
        origin_country: US,
        dest_country: US,
        origin_zip: Some("95042".to_string()),
        dest_zip: 10_042,
        services: vec![US_SERVICE],
        handling_days: 1,
        seller_id: 42,
        categories: vec![20081],
        leaf_categories: vec![20081],
        order_time: Some(OrderTime::new(order_day, 15 * 3600)),
        distance_miles: 2500,
        item_price: 4999,
        shipping_price: Some(599),
        ..EstimateRequest::default()
    };
    vec![
        Scenario {
            name: "analytical",
            request: us.clone(),
        },
        Scenario {
            name: "opted-out",
            request: EstimateRequest {
                seller_id: 501,
                ..us.clone()
            },
        },
        Scenario {
            name: "qa",
            request: EstimateRequest {
                model: Some("qa".to_string()),
                ..us.clone()
            },
        },
        Scenario {
            name: "exclusion",
            request: EstimateRequest {
                origin_zip: Some("30301".to_string()),
                dest_zip: 99_501,
                ..us
            },
        },
        Scenario {
            name: "au-cascade",
            request: EstimateRequest {
                origin_country: AU,
                dest_country: AU,
                origin_zip: Some("2010".to_string()),
                dest_zip: 6000,
                services: vec![AU_SERVICE],
                handling_days: 2,
                ..EstimateRequest::default()
            },
        },
        Scenario {
            name: "cross-border",
            request: EstimateRequest {
                origin_country: UK,
                dest_country: US,
                origin_zip: Some("SW1A".to_string()),
                dest_zip: 10_001,
                services: vec![CROSS_BORDER_SERVICE],
                handling_days: 1,
                ..EstimateRequest::default()
            },
        },
    ]
}
