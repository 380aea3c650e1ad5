//! The postal-code cascade.

use transit_tables::NativeTables;
use transit_types::{
    CountryId, EstimateKey, PostalCode, ServiceEstimate, ServiceId, ServicePairKey, Truncatable,
};

/// Table of the cascade that produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeStage {
    /// Exact origin and destination codes.
    ZipPair,
    /// Origin and destination range buckets.
    RangeBucket,
    /// Origin code only.
    OriginZip,
    /// Destination exclusion zone.
    Exclusion,
}

impl std::fmt::Display for CascadeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ZipPair => "zip-pair",
            Self::RangeBucket => "range-bucket",
            Self::OriginZip => "origin-zip",
            Self::Exclusion => "exclusion",
        };
        f.write_str(name)
    }
}

/// Resolves hour estimates through the postal-code cascade.
///
/// Entries whose `max_hours` is negative never end the cascade.
#[derive(Debug, Clone, Copy)]
pub struct CascadeResolver<'a> {
    tables: &'a NativeTables,
}

impl<'a> CascadeResolver<'a> {
    /// Creates a resolver over a table set.
    #[must_use]
    pub const fn new(tables: &'a NativeTables) -> Self {
        Self { tables }
    }

    /// Returns the first real estimate of the cascade.
    #[must_use]
    pub fn resolve(
        &self,
        service: ServiceId,
        origin_country: CountryId,
        origin_zip: PostalCode,
        dest_country: CountryId,
        dest_zip: PostalCode,
    ) -> Option<ServiceEstimate> {
        self.resolve_with_stage(service, origin_country, origin_zip, dest_country, dest_zip)
            .map(|(_, estimate)| estimate)
    }

    /// Like [`resolve`](Self::resolve), also reporting which table matched.
    #[must_use]
    pub fn resolve_with_stage(
        &self,
        service: ServiceId,
        origin_country: CountryId,
        origin_zip: PostalCode,
        dest_country: CountryId,
        dest_zip: PostalCode,
    ) -> Option<(CascadeStage, ServiceEstimate)> {
        let enabled = self.tables.is_cascade_enabled(&ServicePairKey {
            origin_country,
            dest_country,
            service,
        });
        if !enabled {
            tracing::trace!(%service, %origin_country, %dest_country, "Cascade not enabled");
            return None;
        }

        let hit = self
            .known(EstimateKey::ZipPair {
                service,
                origin_country,
                dest_country,
                origin_zip: origin_zip.value(),
                dest_zip: dest_zip.value(),
            })
            .map(|e| (CascadeStage::ZipPair, e))
            .or_else(|| {
                self.range_bucket(service, origin_country, origin_zip, dest_country, dest_zip)
                    .map(|e| (CascadeStage::RangeBucket, e))
            })
            .or_else(|| {
                origin_zip
                    .prefixes()
                    .find_map(|origin| {
                        self.known(EstimateKey::OriginZip {
                            service,
                            origin_country,
                            dest_country,
                            origin_zip: origin.value(),
                        })
                    })
                    .map(|e| (CascadeStage::OriginZip, e))
            })
            .or_else(|| {
                dest_zip
                    .prefixes()
                    .find_map(|dest| {
                        self.known(EstimateKey::Exclusion {
                            service,
                            dest_country,
                            dest_zip: dest.value(),
                        })
                    })
                    .map(|e| (CascadeStage::Exclusion, e))
            });

        if let Some((stage, estimate)) = hit {
            tracing::trace!(%service, %stage, ?estimate, "Cascade hit");
        }
        hit
    }

    /// Cross-border estimate for a country pair, falling back to the
    /// destination country's domestic pair.
    #[must_use]
    pub fn cross_border(
        &self,
        service: ServiceId,
        origin_country: CountryId,
        dest_country: CountryId,
    ) -> Option<ServiceEstimate> {
        self.known(EstimateKey::CountryPair {
            service,
            origin_country,
            dest_country,
        })
        .or_else(|| {
            self.known(EstimateKey::CountryPair {
                service,
                origin_country: dest_country,
                dest_country,
            })
        })
    }

    /// Origin prefixes form the outer loop; an origin level without a
    /// bucket skips its destination lookups.
    fn range_bucket(
        &self,
        service: ServiceId,
        origin_country: CountryId,
        origin_zip: PostalCode,
        dest_country: CountryId,
        dest_zip: PostalCode,
    ) -> Option<ServiceEstimate> {
        for origin in origin_zip.prefixes() {
            let Some(origin_bucket) = self.tables.range_bucket(origin_country, origin.value())
            else {
                continue;
            };
            for dest in dest_zip.prefixes() {
                let Some(dest_bucket) = self.tables.range_bucket(dest_country, dest.value())
                else {
                    continue;
                };
                let hit = self.known(EstimateKey::RangeBucket {
                    service,
                    origin_country,
                    dest_country,
                    origin_bucket,
                    dest_bucket,
                });
                if hit.is_some() {
                    return hit;
                }
            }
        }
        None
    }

    fn known(&self, key: EstimateKey) -> Option<ServiceEstimate> {
        self.tables.estimate(&key).filter(ServiceEstimate::is_known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{CROSS_BORDER, DOMESTIC, UK_SERVICE, tables};
    use transit_format::records::{RangeEstimateRow, ServicePairRow, ZipField, ZipRangeRow};

    const US: CountryId = CountryId::UNITED_STATES;
    const UK: CountryId = CountryId::UNITED_KINGDOM;

    fn us(zip: i32) -> PostalCode {
        PostalCode::destination(zip, US)
    }

    #[test]
    fn test_exact_zip_pair_wins_over_range_bucket() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        let hit = resolver.resolve_with_stage(DOMESTIC, US, us(95125), US, us(10001));
        assert_eq!(
            hit,
            Some((CascadeStage::ZipPair, ServiceEstimate::new(24, 48)))
        );
    }

    #[test]
    fn test_placeholder_entry_continues_cascade() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        let hit = resolver.resolve_with_stage(DOMESTIC, US, us(95125), US, us(10002));
        assert_eq!(
            hit,
            Some((CascadeStage::RangeBucket, ServiceEstimate::new(72, 96)))
        );
    }

    /// Buckets only at shortened prefixes: 951 falls in 900-999, 1000 in
    /// 1000-1009 and 105 in 100-109.
    fn prefix_bucket_tables(
        extra_ranges: &[(i32, i32)],
        extra: &[(i32, i32, ServiceEstimate)],
    ) -> NativeTables {
        let ranges = [(900, 999), (100, 109), (1000, 1009)]
            .iter()
            .chain(extra_ranges)
            .map(|&(start, end)| ZipRangeRow {
                country: US,
                start: ZipField::Code(start),
                end: ZipField::Code(end),
            })
            .collect::<Vec<_>>();
        let estimates = [
            (900, 1000, ServiceEstimate::new(72, 96)),
            (900, 100, ServiceEstimate::new(96, 120)),
        ]
        .iter()
        .chain(extra)
        .map(|&(origin, dest, estimate)| RangeEstimateRow {
            service: DOMESTIC,
            origin_country: US,
            dest_country: US,
            origin_bucket: ZipField::Code(origin),
            dest_bucket: ZipField::Code(dest),
            estimate,
        })
        .collect::<Vec<_>>();
        NativeTables::builder()
            .with_cascade_services(vec![ServicePairRow {
                origin_country: US,
                dest_country: US,
                service: DOMESTIC,
            }])
            .with_zip_ranges(ranges)
            .with_range_estimates(estimates)
            .build()
    }

    #[test]
    fn test_range_bucket_at_shortened_prefixes() {
        let tables = prefix_bucket_tables(&[], &[]);
        let resolver = CascadeResolver::new(&tables);
        // 95125 and 9512 have no bucket; 10001 has none either, so the
        // first pair to hit is (900, 1000).
        assert_eq!(
            resolver.resolve_with_stage(DOMESTIC, US, us(95125), US, us(10001)),
            Some((CascadeStage::RangeBucket, ServiceEstimate::new(72, 96)))
        );
        // 10501 only buckets at 105.
        assert_eq!(
            resolver.resolve_with_stage(DOMESTIC, US, us(95125), US, us(10501)),
            Some((CascadeStage::RangeBucket, ServiceEstimate::new(96, 120)))
        );
        // no origin level buckets at all
        assert_eq!(resolver.resolve(DOMESTIC, US, us(85125), US, us(10001)), None);
    }

    #[test]
    fn test_range_bucket_origin_levels_come_first() {
        // 95125 now buckets at 95100, which only pairs with destination 100.
        let tables = prefix_bucket_tables(
            &[(95100, 95199)],
            &[(95100, 100, ServiceEstimate::new(120, 144))],
        );
        let resolver = CascadeResolver::new(&tables);
        // walking destinations first would stop at (900, 1000)
        assert_eq!(
            resolver.resolve_with_stage(DOMESTIC, US, us(95125), US, us(10001)),
            Some((CascadeStage::RangeBucket, ServiceEstimate::new(120, 144)))
        );
    }

    #[test]
    fn test_range_placeholder_tries_shorter_destination() {
        let tables = prefix_bucket_tables(
            &[(95100, 95199)],
            &[
                (95100, 1000, ServiceEstimate::UNKNOWN),
                (95100, 100, ServiceEstimate::new(120, 144)),
            ],
        );
        let resolver = CascadeResolver::new(&tables);
        assert_eq!(
            resolver.resolve(DOMESTIC, US, us(95125), US, us(10001)),
            Some(ServiceEstimate::new(120, 144))
        );
    }

    #[test]
    fn test_origin_only_after_range_miss() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        let hit = resolver.resolve_with_stage(DOMESTIC, US, us(95125), US, us(20001));
        assert_eq!(
            hit,
            Some((CascadeStage::OriginZip, ServiceEstimate::new(48, 72)))
        );
    }

    #[test]
    fn test_exclusion_zone_is_last() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        let hit = resolver.resolve_with_stage(DOMESTIC, US, us(11111), US, us(99501));
        assert_eq!(
            hit,
            Some((CascadeStage::Exclusion, ServiceEstimate::new(120, 240)))
        );
        assert_eq!(resolver.resolve(DOMESTIC, US, us(11111), US, us(20001)), None);
    }

    #[test]
    fn test_service_outside_enabled_set() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        assert_eq!(
            resolver.resolve(ServiceId(9999), US, us(95125), US, us(10001)),
            None
        );
    }

    #[test]
    fn test_empty_codes_terminate() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        assert_eq!(resolver.resolve(DOMESTIC, US, us(0), US, us(0)), None);
    }

    #[test]
    fn test_alphanumeric_origin_prefix() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        let origin = PostalCode::big_origin(Some("SW1A 1AA"), UK);
        let dest = PostalCode::destination(0, UK);
        assert_eq!(
            resolver.resolve(UK_SERVICE, UK, origin, UK, dest),
            Some(ServiceEstimate::new(24, 24))
        );
    }

    #[test]
    fn test_cross_border_self_pair_fallback() {
        let tables = tables();
        let resolver = CascadeResolver::new(&tables);
        assert_eq!(
            resolver.cross_border(CROSS_BORDER, UK, US),
            Some(ServiceEstimate::new(120, 168))
        );
        assert_eq!(
            resolver.cross_border(CROSS_BORDER, CountryId::GERMANY, US),
            Some(ServiceEstimate::new(96, 144))
        );
        assert_eq!(resolver.cross_border(CROSS_BORDER, UK, CountryId::AUSTRALIA), None);
    }
}
