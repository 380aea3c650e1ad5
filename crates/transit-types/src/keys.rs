//! Composite lookup keys for the static estimate tables.

use serde::{Deserialize, Serialize};

use crate::{CountryId, ServiceId};

/// Key of an hour-based estimate.
///
/// Every estimate table of the cascade shares one key space; the variant
/// tags which table a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "table", rename_all = "snake_case")]
pub enum EstimateKey {
    /// Exact origin and destination postal codes.
    ZipPair {
        /// Shipping service.
        service: ServiceId,
        /// Origin country.
        origin_country: CountryId,
        /// Destination country.
        dest_country: CountryId,
        /// Normalized origin postal code.
        origin_zip: i32,
        /// Normalized destination postal code.
        dest_zip: i32,
    },
    /// Origin and destination range buckets.
    RangeBucket {
        /// Shipping service.
        service: ServiceId,
        /// Origin country.
        origin_country: CountryId,
        /// Destination country.
        dest_country: CountryId,
        /// Canonical code of the origin bucket.
        origin_bucket: i32,
        /// Canonical code of the destination bucket.
        dest_bucket: i32,
    },
    /// Origin postal code with the buyer's code omitted.
    OriginZip {
        /// Shipping service.
        service: ServiceId,
        /// Origin country.
        origin_country: CountryId,
        /// Destination country.
        dest_country: CountryId,
        /// Normalized origin postal code.
        origin_zip: i32,
    },
    /// Destination postal code inside an exclusion zone.
    Exclusion {
        /// Shipping service.
        service: ServiceId,
        /// Destination country.
        dest_country: CountryId,
        /// Normalized destination postal code.
        dest_zip: i32,
    },
    /// Country pair, used for cross-border trade.
    CountryPair {
        /// Shipping service.
        service: ServiceId,
        /// Origin country.
        origin_country: CountryId,
        /// Destination country.
        dest_country: CountryId,
    },
}

/// A (origin country, destination country, service) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServicePairKey {
    /// Origin country.
    pub origin_country: CountryId,
    /// Destination country.
    pub dest_country: CountryId,
    /// Shipping service.
    pub service: ServiceId,
}

/// A postal code within a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeKey {
    /// Country of the postal code.
    pub country: CountryId,
    /// Normalized postal code.
    pub zip: i32,
}

/// A shipping service within a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceCountryKey {
    /// Country the service operates in.
    pub country: CountryId,
    /// Shipping service.
    pub service: ServiceId,
}
