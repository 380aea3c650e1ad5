//! Shared table set for resolver tests.

use transit_format::records::{
    CountryPairRow, ExclusionRow, OriginZipRow, RangeEstimateRow, ServiceInfoRow,
    ServicePairRow, ZipField, ZipPairRow, ZipRangeRow,
};
use transit_tables::NativeTables;
use transit_types::{CountryId, ServiceEstimate, ServiceId};

pub(crate) const DOMESTIC: ServiceId = ServiceId(1);
pub(crate) const UK_SERVICE: ServiceId = ServiceId(2);
pub(crate) const UNLISTED: ServiceId = ServiceId(3);
pub(crate) const CROSS_BORDER: ServiceId = ServiceId(50_001);

const US: CountryId = CountryId::UNITED_STATES;
const UK: CountryId = CountryId::UNITED_KINGDOM;

fn zip_pair(origin: i32, dest: i32, estimate: ServiceEstimate) -> ZipPairRow {
    ZipPairRow {
        service: DOMESTIC,
        origin_country: US,
        dest_country: US,
        origin_zip: ZipField::Code(origin),
        dest_zip: ZipField::Code(dest),
        estimate,
    }
}

fn range(start: i32, end: i32) -> ZipRangeRow {
    ZipRangeRow {
        country: US,
        start: ZipField::Code(start),
        end: ZipField::Code(end),
    }
}

pub(crate) fn tables() -> NativeTables {
    NativeTables::builder()
        .with_service_info(vec![
            ServiceInfoRow {
                service: DOMESTIC,
                min_hours: 72,
                max_hours: 120,
                working_days: 0x3E,
            },
            ServiceInfoRow {
                service: UNLISTED,
                min_hours: 0,
                max_hours: 48,
                working_days: 0x3F,
            },
        ])
        .with_cascade_services(vec![
            ServicePairRow {
                origin_country: US,
                dest_country: US,
                service: DOMESTIC,
            },
            ServicePairRow {
                origin_country: UK,
                dest_country: UK,
                service: UK_SERVICE,
            },
        ])
        .with_zip_pairs(vec![
            zip_pair(95125, 10001, ServiceEstimate::new(24, 48)),
            zip_pair(95125, 10002, ServiceEstimate::UNKNOWN),
        ])
        .with_zip_ranges(vec![range(95000, 95999), range(10000, 10999)])
        .with_range_estimates(vec![RangeEstimateRow {
            service: DOMESTIC,
            origin_country: US,
            dest_country: US,
            origin_bucket: ZipField::Code(95000),
            dest_bucket: ZipField::Code(10000),
            estimate: ServiceEstimate::new(72, 96),
        }])
        .with_origin_zips(vec![
            OriginZipRow {
                service: DOMESTIC,
                origin_country: US,
                dest_country: US,
                origin_zip: ZipField::Code(951),
                estimate: ServiceEstimate::new(48, 72),
            },
            OriginZipRow {
                service: UK_SERVICE,
                origin_country: UK,
                dest_country: UK,
                origin_zip: ZipField::from("SW"),
                estimate: ServiceEstimate::new(24, 24),
            },
        ])
        .with_exclusions(vec![ExclusionRow {
            service: DOMESTIC,
            dest_country: US,
            dest_zip: ZipField::Code(99),
            estimate: ServiceEstimate::new(120, 240),
        }])
        .with_country_pairs(vec![
            CountryPairRow {
                service: CROSS_BORDER,
                origin_country: UK,
                dest_country: US,
                estimate: ServiceEstimate::new(120, 168),
            },
            CountryPairRow {
                service: CROSS_BORDER,
                origin_country: US,
                dest_country: US,
                estimate: ServiceEstimate::new(96, 144),
            },
        ])
        .build()
}
