//! Native estimate tables consulted by the postal-code cascade.

use std::collections::{HashMap, HashSet};

use transit_calendar::WorkingDays;
use transit_format::records::{
    BaseServiceRow, CountryPairRow, ExclusionRow, OriginZipRow, RangeEstimateRow,
    ServiceInfoRow, ServicePairRow, ZipPairRow, ZipRangeRow,
};
use transit_types::{
    CountryId, EstimateKey, RangeKey, ServiceCountryKey, ServiceEstimate, ServiceId,
    ServicePairKey,
};

/// Postal codes that are never assigned to a range bucket.
pub const EXCLUDED_RANGE_ZIPS: [i32; 5] = [2898, 2899, 6798, 6799, 7151];

/// Widest range, in codes, expanded into bucket membership.
pub const MAX_RANGE_WIDTH: i64 = 100_000;

/// Default estimate and working days of a shipping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Hour bounds used when no finer table matches.
    pub estimate: ServiceEstimate,
    /// Weekdays the service delivers on.
    pub working_days: WorkingDays,
}

/// Number of entries per native table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeTableSizes {
    /// Per-service defaults.
    pub service_info: usize,
    /// Exact zip pairs.
    pub zip_pairs: usize,
    /// Postal codes with a range bucket.
    pub range_members: usize,
    /// Bucket-pair estimates.
    pub range_estimates: usize,
    /// Origin-only estimates.
    pub origin_zips: usize,
    /// Exclusion-zone estimates.
    pub exclusions: usize,
    /// Country-pair estimates.
    pub country_pairs: usize,
    /// Cascade-enabled (origin, destination, service) triples.
    pub cascade_services: usize,
    /// Base-service mappings.
    pub base_services: usize,
    /// Rows dropped because a postal code or range could not be normalized.
    pub skipped_rows: usize,
}

/// Read-only native estimate tables.
#[derive(Debug, Clone, Default)]
pub struct NativeTables {
    service_info: HashMap<ServiceId, ServiceInfo>,
    estimates: HashMap<EstimateKey, ServiceEstimate>,
    range_buckets: HashMap<RangeKey, i32>,
    cascade_services: HashSet<ServicePairKey>,
    base_services: HashMap<ServiceCountryKey, ServiceId>,
    sizes: NativeTableSizes,
}

impl NativeTables {
    /// Starts building a table set.
    #[must_use]
    pub fn builder() -> NativeTablesBuilder {
        NativeTablesBuilder::default()
    }

    /// Returns the default estimate of a service.
    #[must_use]
    pub fn service_info(&self, service: ServiceId) -> Option<&ServiceInfo> {
        self.service_info.get(&service)
    }

    /// Returns the stored estimate for a key, including negative placeholders.
    #[must_use]
    pub fn estimate(&self, key: &EstimateKey) -> Option<ServiceEstimate> {
        self.estimates.get(key).copied()
    }

    /// Returns the canonical bucket of a postal code.
    #[must_use]
    pub fn range_bucket(&self, country: CountryId, zip: i32) -> Option<i32> {
        self.range_buckets.get(&RangeKey { country, zip }).copied()
    }

    /// Returns true if the triple may use the postal-code cascade.
    #[must_use]
    pub fn is_cascade_enabled(&self, key: &ServicePairKey) -> bool {
        self.cascade_services.contains(key)
    }

    /// Returns the base service of a service within a country.
    #[must_use]
    pub fn base_service(&self, country: CountryId, service: ServiceId) -> Option<ServiceId> {
        self.base_services
            .get(&ServiceCountryKey { country, service })
            .copied()
    }

    /// Returns the number of entries per table.
    #[must_use]
    pub const fn sizes(&self) -> &NativeTableSizes {
        &self.sizes
    }
}

/// Assembles [`NativeTables`] from row records.
///
/// Postal code columns are normalized with the radix of the column's
/// country; rows whose codes cannot be normalized are skipped.
#[derive(Debug, Default)]
pub struct NativeTablesBuilder {
    tables: NativeTables,
}

impl NativeTablesBuilder {
    /// Adds per-service defaults.
    #[must_use]
    pub fn with_service_info(mut self, rows: impl IntoIterator<Item = ServiceInfoRow>) -> Self {
        for row in rows {
            let info = ServiceInfo {
                estimate: ServiceEstimate::new(row.min_hours, row.max_hours),
                working_days: WorkingDays(row.working_days),
            };
            self.tables.service_info.insert(row.service, info);
        }
        self.tables.sizes.service_info = self.tables.service_info.len();
        self
    }

    /// Adds exact zip-pair estimates.
    #[must_use]
    pub fn with_zip_pairs(mut self, rows: impl IntoIterator<Item = ZipPairRow>) -> Self {
        for row in rows {
            let zips = row
                .origin_zip
                .normalize(row.origin_country)
                .zip(row.dest_zip.normalize(row.dest_country));
            let key = zips.map(|(origin_zip, dest_zip)| EstimateKey::ZipPair {
                service: row.service,
                origin_country: row.origin_country,
                dest_country: row.dest_country,
                origin_zip,
                dest_zip,
            });
            self.insert_estimate(key, row.estimate, |s| &mut s.zip_pairs);
        }
        self
    }

    /// Adds range bucket membership.
    ///
    /// Every code of an inclusive range maps to the range's first code,
    /// except the codes in [`EXCLUDED_RANGE_ZIPS`]. Ranges wider than
    /// [`MAX_RANGE_WIDTH`] are skipped.
    #[must_use]
    pub fn with_zip_ranges(mut self, rows: impl IntoIterator<Item = ZipRangeRow>) -> Self {
        for row in rows {
            let bounds = row
                .start
                .normalize(row.country)
                .zip(row.end.normalize(row.country))
                .filter(|(start, end)| start <= end);
            let Some((start, end)) = bounds else {
                self.tables.sizes.skipped_rows += 1;
                continue;
            };
            let width = i64::from(end) - i64::from(start) + 1;
            if width > MAX_RANGE_WIDTH {
                tracing::warn!(
                    country = %row.country,
                    start,
                    end,
                    width,
                    "Skipped oversized postal code range"
                );
                self.tables.sizes.skipped_rows += 1;
                continue;
            }
            for zip in (start..=end).filter(|zip| !EXCLUDED_RANGE_ZIPS.contains(zip)) {
                self.tables.range_buckets.insert(
                    RangeKey {
                        country: row.country,
                        zip,
                    },
                    start,
                );
            }
        }
        self.tables.sizes.range_members = self.tables.range_buckets.len();
        self
    }

    /// Adds bucket-pair estimates.
    #[must_use]
    pub fn with_range_estimates(
        mut self,
        rows: impl IntoIterator<Item = RangeEstimateRow>,
    ) -> Self {
        for row in rows {
            let buckets = row
                .origin_bucket
                .normalize(row.origin_country)
                .zip(row.dest_bucket.normalize(row.dest_country));
            let key = buckets.map(|(origin_bucket, dest_bucket)| EstimateKey::RangeBucket {
                service: row.service,
                origin_country: row.origin_country,
                dest_country: row.dest_country,
                origin_bucket,
                dest_bucket,
            });
            self.insert_estimate(key, row.estimate, |s| &mut s.range_estimates);
        }
        self
    }

    /// Adds origin-only estimates.
    #[must_use]
    pub fn with_origin_zips(mut self, rows: impl IntoIterator<Item = OriginZipRow>) -> Self {
        for row in rows {
            let key = row
                .origin_zip
                .normalize(row.origin_country)
                .map(|origin_zip| EstimateKey::OriginZip {
                    service: row.service,
                    origin_country: row.origin_country,
                    dest_country: row.dest_country,
                    origin_zip,
                });
            self.insert_estimate(key, row.estimate, |s| &mut s.origin_zips);
        }
        self
    }

    /// Adds exclusion-zone estimates.
    #[must_use]
    pub fn with_exclusions(mut self, rows: impl IntoIterator<Item = ExclusionRow>) -> Self {
        for row in rows {
            let key = row
                .dest_zip
                .normalize(row.dest_country)
                .map(|dest_zip| EstimateKey::Exclusion {
                    service: row.service,
                    dest_country: row.dest_country,
                    dest_zip,
                });
            self.insert_estimate(key, row.estimate, |s| &mut s.exclusions);
        }
        self
    }

    /// Adds country-pair estimates.
    #[must_use]
    pub fn with_country_pairs(mut self, rows: impl IntoIterator<Item = CountryPairRow>) -> Self {
        for row in rows {
            let key = EstimateKey::CountryPair {
                service: row.service,
                origin_country: row.origin_country,
                dest_country: row.dest_country,
            };
            self.insert_estimate(Some(key), row.estimate, |s| &mut s.country_pairs);
        }
        self
    }

    /// Adds the cascade-enabled service set.
    #[must_use]
    pub fn with_cascade_services(
        mut self,
        rows: impl IntoIterator<Item = ServicePairRow>,
    ) -> Self {
        self.tables
            .cascade_services
            .extend(rows.into_iter().map(|row| ServicePairKey {
                origin_country: row.origin_country,
                dest_country: row.dest_country,
                service: row.service,
            }));
        self.tables.sizes.cascade_services = self.tables.cascade_services.len();
        self
    }

    /// Adds base-service mappings.
    #[must_use]
    pub fn with_base_services(mut self, rows: impl IntoIterator<Item = BaseServiceRow>) -> Self {
        for row in rows {
            self.tables.base_services.insert(
                ServiceCountryKey {
                    country: row.country,
                    service: row.service,
                },
                row.base_service,
            );
        }
        self.tables.sizes.base_services = self.tables.base_services.len();
        self
    }

    /// Finishes the table set.
    #[must_use]
    pub fn build(self) -> NativeTables {
        let sizes = &self.tables.sizes;
        if sizes.skipped_rows > 0 {
            tracing::warn!(
                skipped = sizes.skipped_rows,
                "Skipped native table rows with unusable postal codes"
            );
        }
        tracing::info!(
            service_info = sizes.service_info,
            zip_pairs = sizes.zip_pairs,
            range_members = sizes.range_members,
            range_estimates = sizes.range_estimates,
            origin_zips = sizes.origin_zips,
            exclusions = sizes.exclusions,
            country_pairs = sizes.country_pairs,
            cascade_services = sizes.cascade_services,
            base_services = sizes.base_services,
            "Built native tables"
        );
        self.tables
    }

    fn insert_estimate(
        &mut self,
        key: Option<EstimateKey>,
        estimate: ServiceEstimate,
        count: impl FnOnce(&mut NativeTableSizes) -> &mut usize,
    ) {
        match key {
            Some(key) => {
                if self.tables.estimates.insert(key, estimate).is_none() {
                    *count(&mut self.tables.sizes) += 1;
                }
            }
            None => self.tables.sizes.skipped_rows += 1,
        }
    }
}
