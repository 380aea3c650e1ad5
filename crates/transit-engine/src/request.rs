//! Per-request inputs.

use serde::{Deserialize, Serialize};
use transit_calendar::WorkingDays;
use transit_types::{CountryId, DeliveryEstimate, OrderTime, ServiceId};

/// A native estimate computed by the host before the request arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    /// Service the estimate is for.
    pub service: ServiceId,
    /// Working days of that service.
    #[serde(default)]
    pub working_days: WorkingDays,
    /// Day bounds.
    #[serde(flatten)]
    pub estimate: DeliveryEstimate,
}

/// One estimate request.
///
/// Every field but the countries is optional in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateRequest {
    /// Seller's country.
    pub origin_country: CountryId,
    /// Buyer's country.
    pub dest_country: CountryId,
    /// Buyer's region within the country.
    pub dest_region: i32,
    /// Raw origin postal code.
    pub origin_zip: Option<String>,
    /// Pre-parsed destination postal code; zero when unknown.
    pub dest_zip: i32,
    /// Services offered on the listing, in listing order.
    pub services: Vec<ServiceId>,
    /// Service chosen by the shipping calculator when it reported no error.
    pub calculated_service: Option<ServiceId>,
    /// Calculated shipping price in cents when the calculator reported no error.
    pub shipping_price: Option<i64>,
    /// Seller handling time in days; zero counts as one.
    pub handling_days: i32,
    /// Item price in cents.
    pub item_price: i64,
    /// Order or payment time.
    pub order_time: Option<OrderTime>,
    /// Origin to destination distance in miles.
    pub distance_miles: i64,
    /// Seller id.
    pub seller_id: i64,
    /// Seller-level opt-out flag.
    pub opt_out: bool,
    /// All categories of the listing; the first is checked against opt-outs.
    pub categories: Vec<i64>,
    /// Leaf categories of the listing; the first feeds the analytical model.
    pub leaf_categories: Vec<i64>,
    /// Listing site.
    pub site: i32,
    /// Model selection token (`b`, `qa`, `D<digit>`).
    pub model: Option<String>,
    /// Native estimate supplied by the host.
    pub baseline: Option<Baseline>,
}
