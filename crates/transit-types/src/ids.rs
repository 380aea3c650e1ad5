//! Country and shipping service identifiers.

use std::str::FromStr;

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::{PostalRadix, TransitError};

/// Marketplace country identifier.
///
/// Zero means "unknown country".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CountryId(pub i16);

impl CountryId {
    /// United States.
    pub const UNITED_STATES: Self = Self(1);
    /// United Kingdom.
    pub const UNITED_KINGDOM: Self = Self(3);
    /// Australia.
    pub const AUSTRALIA: Self = Self(15);
    /// Germany.
    pub const GERMANY: Self = Self(77);

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i16 {
        self.0
    }

    /// Returns true unless this is the zero "unknown" id.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.0 != 0
    }

    /// Returns the numeral base of this country's postal codes.
    #[must_use]
    pub const fn postal_radix(self) -> PostalRadix {
        if self.0 == Self::UNITED_KINGDOM.0 {
            PostalRadix::Alphanumeric
        } else {
            PostalRadix::Decimal
        }
    }
}

impl FromStr for CountryId {
    type Err = TransitError;

    /// Parses either a numeric id or one of the ISO codes the engine knows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<i16>() {
            return Ok(Self(id));
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "US" | "USA" => Ok(Self::UNITED_STATES),
            "UK" | "GB" | "GBR" => Ok(Self::UNITED_KINGDOM),
            "AU" | "AUS" => Ok(Self::AUSTRALIA),
            "DE" | "DEU" => Ok(Self::GERMANY),
            _ => Err(TransitError::UnknownCountry(s.to_string())),
        }
    }
}

/// Shipping service identifier.
///
/// Ids at or above [`ServiceId::CROSS_BORDER_FLOOR`] denote international services.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ServiceId(pub i32);

impl ServiceId {
    /// First id of the cross-border service range.
    pub const CROSS_BORDER_FLOOR: i32 = 50_000;

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns true unless this is the zero "no service" id.
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    /// Returns true for international (cross-border trade) services.
    #[must_use]
    pub const fn is_cross_border(self) -> bool {
        self.0 >= Self::CROSS_BORDER_FLOOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_from_str() {
        assert_eq!("us".parse::<CountryId>().unwrap(), CountryId::UNITED_STATES);
        assert_eq!("GB".parse::<CountryId>().unwrap(), CountryId::UNITED_KINGDOM);
        assert_eq!("15".parse::<CountryId>().unwrap(), CountryId::AUSTRALIA);
        assert!("atlantis".parse::<CountryId>().is_err());
    }

    #[test]
    fn test_postal_radix() {
        assert_eq!(CountryId::UNITED_KINGDOM.postal_radix(), PostalRadix::Alphanumeric);
        assert_eq!(CountryId::GERMANY.postal_radix(), PostalRadix::Decimal);
    }

    #[test]
    fn test_cross_border_service() {
        assert!(ServiceId(50_000).is_cross_border());
        assert!(!ServiceId(7712).is_cross_border());
        assert!(!ServiceId::default().is_set());
    }
}
