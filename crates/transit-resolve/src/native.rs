//! Rule-based native estimator.

use transit_calendar::WorkingDays;
use transit_tables::NativeTables;
use transit_types::{
    CountryId, DeliveryEstimate, PostalCode, ServiceEstimate, ServiceId, normalize_handling_days,
};

use crate::{CascadeResolver, CascadeStage};

/// Inputs of a native estimate.
#[derive(Debug, Clone, Copy)]
pub struct NativeQuery<'a> {
    /// Seller's country.
    pub origin_country: CountryId,
    /// Buyer's country.
    pub dest_country: CountryId,
    /// Raw origin postal code.
    pub origin_zip: Option<&'a str>,
    /// Pre-parsed destination postal code.
    pub dest_zip: i32,
    /// Service chosen by the shipping calculator, when it reported no error.
    pub calculated_service: Option<ServiceId>,
    /// Services offered on the listing, in listing order.
    pub services: &'a [ServiceId],
    /// Seller handling time in days.
    pub handling_days: i32,
}

impl NativeQuery<'_> {
    /// Returns true if origin and destination countries differ.
    #[must_use]
    pub fn is_cross_border(&self) -> bool {
        self.origin_country != self.dest_country
    }
}

/// Which table produced a native estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeSource {
    /// The postal-code cascade.
    Cascade(CascadeStage),
    /// The country-pair table.
    CountryPair,
    /// The per-service default.
    ServiceDefault,
    /// Nothing matched.
    Unknown,
}

impl std::fmt::Display for NativeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cascade(stage) => write!(f, "cascade:{stage}"),
            Self::CountryPair => f.write_str("country-pair"),
            Self::ServiceDefault => f.write_str("service-default"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Result of a native estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeEstimate {
    /// Selected shipping service.
    pub service: ServiceId,
    /// Hour bounds.
    pub hours: ServiceEstimate,
    /// Day bounds including handling time.
    pub estimate: DeliveryEstimate,
    /// Working days of the selected service.
    pub working_days: WorkingDays,
    /// Table that produced the hours.
    pub source: NativeSource,
}

/// Rule-based estimator over the native tables.
#[derive(Debug, Clone, Copy)]
pub struct NativeEstimator<'a> {
    tables: &'a NativeTables,
}

impl<'a> NativeEstimator<'a> {
    /// Creates an estimator over a table set.
    #[must_use]
    pub const fn new(tables: &'a NativeTables) -> Self {
        Self { tables }
    }

    /// Picks the service to estimate for.
    ///
    /// The calculated service wins; otherwise the first listed service whose
    /// cross-border range matches the trade type.
    #[must_use]
    pub fn select_service(query: &NativeQuery<'_>) -> Option<ServiceId> {
        let cross_border = query.is_cross_border();
        query
            .calculated_service
            .filter(|service| service.is_set())
            .or_else(|| {
                query
                    .services
                    .iter()
                    .copied()
                    .find(|service| service.is_set() && service.is_cross_border() == cross_border)
            })
    }

    /// Estimates delivery days, or `None` when no service applies.
    #[must_use]
    pub fn estimate(&self, query: &NativeQuery<'_>) -> Option<NativeEstimate> {
        let service = Self::select_service(query)?;
        let info = self.tables.service_info(service);
        let resolver = CascadeResolver::new(self.tables);

        let origin = PostalCode::big_origin(query.origin_zip, query.origin_country);
        let dest = PostalCode::destination(query.dest_zip, query.dest_country);
        // postal-code tables only describe domestic lanes
        let cascade = if query.is_cross_border() {
            None
        } else {
            resolver
                .resolve_with_stage(service, query.origin_country, origin, query.dest_country, dest)
                .map(|(stage, hours)| (NativeSource::Cascade(stage), hours))
        };

        let (source, hours) = cascade
            .or_else(|| {
                if query.is_cross_border() || service.is_cross_border() {
                    resolver
                        .cross_border(service, query.origin_country, query.dest_country)
                        .map(|hours| (NativeSource::CountryPair, hours))
                } else {
                    info.map(|info| (NativeSource::ServiceDefault, info.estimate))
                }
            })
            .unwrap_or((NativeSource::Unknown, ServiceEstimate::UNKNOWN));

        let estimate = hours.to_days(normalize_handling_days(query.handling_days));
        tracing::trace!(%service, %source, %estimate, "Native estimate");

        Some(NativeEstimate {
            service,
            hours,
            estimate,
            working_days: info.map(|info| info.working_days).unwrap_or_default(),
            source,
        })
    }
}
