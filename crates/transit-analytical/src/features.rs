//! The analytical feature layout.

use serde::{Deserialize, Serialize};

/// One slot of the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Hour of the order time (0-23).
    HourOfDay,
    /// Day of week of the order, Sunday = 1.
    DayOfWeek,
    /// Month of the order (1-12).
    MonthOfYear,
    /// Shipping price in whole currency units, rounded up.
    ShippingFee,
    /// Item price in whole currency units, rounded up.
    ItemPrice,
    /// Distance in 55 km buckets, or -1 without an origin code.
    Distance,
    /// Seller handling time in days.
    HandlingDays,
    /// Days from the order day to the next working day.
    DaysFromNonworkingDay,
    /// 1 if the order day is an origin-country holiday.
    IsPaymentOnHoliday,
    /// Seller all-time average.
    SellerTotalAverage,
    /// Seller average for the order weekday.
    SellerDayAverage,
    /// Leaf category all-time average.
    CategoryTotalAverage,
    /// Leaf category average for the order weekday.
    CategoryDayAverage,
    /// Shipping method all-time average.
    ShippingMethodTotalAverage,
    /// Shipping method average for the order weekday.
    ShippingMethodDayAverage,
    /// Zip pair all-time average.
    ZipTotalAverage,
    /// Zip pair average for the order weekday.
    ZipDayAverage,
    /// Shipping method and zip pair all-time average.
    ShippingMethodZipTotalAverage,
    /// Shipping method and zip pair average for the order weekday.
    ShippingMethodZipDayAverage,
}

impl Feature {
    /// Number of features.
    pub const COUNT: usize = 19;

    /// All features in vector order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::HourOfDay,
        Self::DayOfWeek,
        Self::MonthOfYear,
        Self::ShippingFee,
        Self::ItemPrice,
        Self::Distance,
        Self::HandlingDays,
        Self::DaysFromNonworkingDay,
        Self::IsPaymentOnHoliday,
        Self::SellerTotalAverage,
        Self::SellerDayAverage,
        Self::CategoryTotalAverage,
        Self::CategoryDayAverage,
        Self::ShippingMethodTotalAverage,
        Self::ShippingMethodDayAverage,
        Self::ZipTotalAverage,
        Self::ZipDayAverage,
        Self::ShippingMethodZipTotalAverage,
        Self::ShippingMethodZipDayAverage,
    ];

    /// Returns the position of this feature in the vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A complete feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; Feature::COUNT]);

impl FeatureVector {
    /// Sentinel for a missing historical average.
    pub const MISSING: f64 = -1.0;

    /// Creates a vector with every feature zero.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self([0.0; Feature::COUNT])
    }

    /// Returns one feature.
    #[must_use]
    pub const fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// Sets one feature.
    pub const fn set(&mut self, feature: Feature, value: f64) {
        self.0[feature.index()] = value;
    }

    /// Returns the raw values in vector order.
    #[must_use]
    pub const fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterates over `(feature, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.iter().map(|&f| (f, self.get(f)))
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_indices() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut features = FeatureVector::zeroed();
        features.set(Feature::Distance, -1.0);
        assert_eq!(features.get(Feature::Distance), -1.0);
        assert_eq!(features.iter().count(), Feature::COUNT);
    }

    #[test]
    fn test_feature_names() {
        let name = serde_json::to_string(&Feature::ShippingMethodZipDayAverage).unwrap();
        assert_eq!(name, "\"shipping_method_zip_day_average\"");
    }
}
