//! Analytical eligibility and routing.

use serde::{Deserialize, Serialize};
use transit_types::{CountryId, DeliveryEstimate};

use crate::OptOutSet;

/// Inputs of the delegated eligibility predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityQuery {
    /// Seller's country.
    pub origin_country: CountryId,
    /// Buyer's country.
    pub dest_country: CountryId,
    /// Buyer's region within the country.
    pub dest_region: i32,
    /// Buyer's full postal code.
    pub dest_zip: i32,
    /// Handling time in days, already normalized.
    pub handling_days: i32,
    /// Listing site.
    pub site: i32,
}

/// Decides whether a listing may use the analytical estimate.
pub trait EligibilityPredicate: Send + Sync {
    /// Returns true if the query is eligible.
    fn is_eligible(&self, query: &EligibilityQuery) -> bool;
}

impl<F> EligibilityPredicate for F
where
    F: Fn(&EligibilityQuery) -> bool + Send + Sync,
{
    fn is_eligible(&self, query: &EligibilityQuery) -> bool {
        self(query)
    }
}

/// Configured eligibility rules. Empty lists allow everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleEligibility {
    /// Allowed (origin, destination) country pairs.
    pub country_pairs: Vec<(CountryId, CountryId)>,
    /// Allowed listing sites.
    pub sites: Vec<i32>,
    /// Longest allowed handling time.
    pub max_handling_days: Option<i32>,
    /// Destination regions that are never eligible.
    pub excluded_regions: Vec<i32>,
    /// Whether a destination postal code is required.
    pub require_dest_zip: bool,
}

impl Default for RuleEligibility {
    fn default() -> Self {
        Self {
            country_pairs: Vec::new(),
            sites: Vec::new(),
            max_handling_days: None,
            excluded_regions: Vec::new(),
            require_dest_zip: true,
        }
    }
}

impl EligibilityPredicate for RuleEligibility {
    fn is_eligible(&self, query: &EligibilityQuery) -> bool {
        let pair = (query.origin_country, query.dest_country);
        (self.country_pairs.is_empty() || self.country_pairs.contains(&pair))
            && (self.sites.is_empty() || self.sites.contains(&query.site))
            && self
                .max_handling_days
                .is_none_or(|max| query.handling_days <= max)
            && !self.excluded_regions.contains(&query.dest_region)
            && (!self.require_dest_zip || query.dest_zip != 0)
    }
}

/// Downstream path of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Keep the native estimate.
    Native,
    /// Postal-code cascade with the base service.
    Cascade,
    /// Analytical estimator or its QA lookup.
    Analytical,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Cascade => f.write_str("cascade"),
            Self::Analytical => f.write_str("analytical"),
        }
    }
}

/// Per-request inputs of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateInput {
    /// Inputs of the delegated predicate.
    pub query: EligibilityQuery,
    /// The native estimate already computed for the request.
    pub baseline: DeliveryEstimate,
    /// Seller-level opt-out flag.
    pub opt_out: bool,
    /// Seller id.
    pub seller_id: i64,
    /// First category of the listing.
    pub category: Option<i64>,
}

/// Decides whether, and where, the analytical path runs.
#[derive(Clone, Copy)]
pub struct Gate<'a> {
    predicate: &'a dyn EligibilityPredicate,
    opt_outs: &'a OptOutSet,
    analytical_country: CountryId,
}

impl std::fmt::Debug for Gate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("opt_outs", self.opt_outs)
            .field("analytical_country", &self.analytical_country)
            .finish_non_exhaustive()
    }
}

impl<'a> Gate<'a> {
    /// Creates a gate.
    #[must_use]
    pub const fn new(
        predicate: &'a dyn EligibilityPredicate,
        opt_outs: &'a OptOutSet,
        analytical_country: CountryId,
    ) -> Self {
        Self {
            predicate,
            opt_outs,
            analytical_country,
        }
    }

    /// Returns true if the analytical path may run.
    #[must_use]
    pub fn is_eligible(&self, input: &GateInput) -> bool {
        if input.opt_out || !input.baseline.is_known() {
            return false;
        }
        let opted_out = input
            .category
            .is_some_and(|category| self.opt_outs.contains(input.seller_id, category));
        !opted_out && self.predicate.is_eligible(&input.query)
    }

    /// Picks the path for a request.
    #[must_use]
    pub fn route(&self, input: &GateInput) -> Route {
        if !self.is_eligible(input) {
            return Route::Native;
        }
        match input.query.dest_country {
            CountryId::AUSTRALIA => Route::Cascade,
            country if country == self.analytical_country => Route::Analytical,
            _ => Route::Native,
        }
    }
}
