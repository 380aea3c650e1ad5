//! Postal code normalization and prefix truncation.
//!
//! Postal codes become integers so that every table can be keyed the same
//! way and probed with progressively shorter prefixes. Numeric codes keep
//! their decimal value; codes of countries that use letters are read as
//! base-36 numbers (`0-9` then `A-Z`), so dropping the last character is a
//! division by 36 in both cases.

use serde::{Deserialize, Serialize};

use crate::CountryId;

/// Maximum characters read from an origin postal code for feature lookups.
pub const ORIGIN_MAX_LEN: usize = 4;

/// Characters kept from an origin postal code outside Australia.
pub const ORIGIN_SHORT_LEN: usize = 3;

/// Maximum characters read from an origin postal code for cascade lookups.
pub const BIG_ORIGIN_MAX_LEN: usize = 9;

/// Offset mapping `'A'` to digit 10.
const LETTER_OFFSET: i32 = 55;

/// Numeral base of a country's postal codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostalRadix {
    /// Digits only, base 10.
    #[default]
    Decimal,
    /// Digits and letters, base 36.
    Alphanumeric,
}

impl PostalRadix {
    /// Returns the numeral base.
    #[must_use]
    pub const fn base(self) -> i32 {
        match self {
            Self::Decimal => 10,
            Self::Alphanumeric => 36,
        }
    }

    /// Returns the digit value of an ASCII character, if it is a digit in this base.
    #[must_use]
    pub const fn digit(self, c: u8) -> Option<i32> {
        match c {
            b'0'..=b'9' => Some((c - b'0') as i32),
            b'A'..=b'Z' if matches!(self, Self::Alphanumeric) => Some(c as i32 - LETTER_OFFSET),
            b'a'..=b'z' if matches!(self, Self::Alphanumeric) => {
                Some(c.to_ascii_uppercase() as i32 - LETTER_OFFSET)
            }
            _ => None,
        }
    }
}

/// A value that can be shortened one digit at a time for prefix matching.
pub trait Truncatable: Copy {
    /// Drops the least-significant digit.
    #[must_use]
    fn truncated(self) -> Self;

    /// Returns true once no digits remain.
    fn is_exhausted(&self) -> bool;

    /// Returns the chain of prefixes, longest first, excluding the empty one.
    fn prefixes(self) -> Prefixes<Self> {
        Prefixes { current: self }
    }
}

/// Iterator over successively shorter prefixes of a [`Truncatable`] value.
#[derive(Debug, Clone)]
pub struct Prefixes<T> {
    current: T,
}

impl<T: Truncatable> Iterator for Prefixes<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_exhausted() {
            return None;
        }
        let out = self.current;
        self.current = out.truncated();
        Some(out)
    }
}

/// A postal code normalized to an integer in its country's base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCode {
    value: i32,
    radix: PostalRadix,
}

impl PostalCode {
    /// Wraps an already-normalized value.
    #[must_use]
    pub const fn new(value: i32, radix: PostalRadix) -> Self {
        Self { value, radix }
    }

    /// Returns the normalized value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Returns the numeral base the value is expressed in.
    #[must_use]
    pub const fn radix(&self) -> PostalRadix {
        self.radix
    }

    /// Reads up to `max_len` characters left to right, stopping at the first
    /// character that is not a digit in `radix`.
    ///
    /// Returns `None` for empty input. Unparseable input yields whatever has
    /// been accumulated (possibly zero); accumulation also stops before the
    /// value would overflow.
    #[must_use]
    pub fn parse(raw: &str, radix: PostalRadix, max_len: usize) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let base = radix.base();
        let mut value: i32 = 0;
        for &c in raw.as_bytes().iter().take(max_len) {
            let Some(digit) = radix.digit(c) else { break };
            match value.checked_mul(base).and_then(|v| v.checked_add(digit)) {
                Some(next) => value = next,
                None => break,
            }
        }
        Some(Self { value, radix })
    }

    /// Normalizes a full postal code as stored in a table extract.
    #[must_use]
    pub fn from_table_text(text: &str, country: CountryId) -> Option<Self> {
        Self::parse(text.trim(), country.postal_radix(), usize::MAX)
    }

    /// Normalizes an origin code for historical-feature lookups.
    ///
    /// Australia keeps four characters, every other country three.
    #[must_use]
    pub fn origin(raw: Option<&str>, country: CountryId) -> Option<Self> {
        let max_len = if country == CountryId::AUSTRALIA {
            ORIGIN_MAX_LEN
        } else {
            ORIGIN_SHORT_LEN
        };
        Self::parse(raw?, country.postal_radix(), max_len)
    }

    /// Normalizes an origin code for cascade lookups, keeping up to nine
    /// characters. Missing input becomes the empty code.
    #[must_use]
    pub fn big_origin(raw: Option<&str>, country: CountryId) -> Self {
        let radix = country.postal_radix();
        raw.and_then(|raw| Self::parse(raw, radix, BIG_ORIGIN_MAX_LEN))
            .unwrap_or(Self::new(0, radix))
    }

    /// Wraps a pre-parsed destination code without changing its width.
    #[must_use]
    pub const fn destination(zip: i32, country: CountryId) -> Self {
        Self::new(zip, country.postal_radix())
    }

    /// Reduces a pre-parsed destination code to the width historical tables use.
    ///
    /// The US and Germany keep their leading three digits, Australia keeps
    /// the whole code, and other countries keep small codes whole and
    /// drop two digits from codes of five or more digits.
    #[must_use]
    pub const fn canonical_destination(zip: i32, country: CountryId) -> Self {
        let value = if country.0 == CountryId::UNITED_STATES.0 || country.0 == CountryId::GERMANY.0
        {
            zip / 100
        } else if country.0 == CountryId::AUSTRALIA.0 || zip < 10_000 {
            zip
        } else {
            zip / 100
        };
        Self::new(value, country.postal_radix())
    }
}

impl Truncatable for PostalCode {
    fn truncated(self) -> Self {
        Self {
            value: self.value / self.radix.base(),
            radix: self.radix,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.value <= 0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.radix {
            PostalRadix::Decimal => write!(f, "{}", self.value),
            PostalRadix::Alphanumeric => {
                if self.value <= 0 {
                    return write!(f, "{}", self.value);
                }
                let mut digits = Vec::new();
                let mut rest = self.value;
                while rest > 0 {
                    let d = rest % 36;
                    let c = if d < 10 { b'0' + d as u8 } else { (d + LETTER_OFFSET) as u8 };
                    digits.push(c as char);
                    rest /= 36;
                }
                digits.iter().rev().try_for_each(|c| write!(f, "{c}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_stops_at_non_digit() {
        let code = PostalCode::parse("95126-1234", PostalRadix::Decimal, BIG_ORIGIN_MAX_LEN).unwrap();
        assert_eq!(code.value(), 95126);
    }

    #[test]
    fn test_parse_respects_max_len() {
        let code = PostalCode::parse("951261234", PostalRadix::Decimal, 3).unwrap();
        assert_eq!(code.value(), 951);
    }

    #[test]
    fn test_parse_empty_is_missing() {
        assert!(PostalCode::parse("", PostalRadix::Decimal, 4).is_none());
        assert!(PostalCode::origin(None, CountryId::UNITED_STATES).is_none());
        let partial = PostalCode::parse("ABC", PostalRadix::Decimal, 4).unwrap();
        assert_eq!(partial.value(), 0);
    }

    #[test]
    fn test_parse_alphanumeric() {
        // "SW1" = 28 * 36^2 + 32 * 36 + 1
        let code = PostalCode::parse("SW1A 1AA", PostalRadix::Alphanumeric, 3).unwrap();
        assert_eq!(code.value(), 28 * 36 * 36 + 32 * 36 + 1);
        let lower = PostalCode::parse("sw1", PostalRadix::Alphanumeric, 3).unwrap();
        assert_eq!(lower, code);
        assert_eq!(code.to_string(), "SW1");
    }

    #[test]
    fn test_parse_alphanumeric_never_overflows() {
        let code =
            PostalCode::parse("ZZZZZZZZZ", PostalRadix::Alphanumeric, BIG_ORIGIN_MAX_LEN).unwrap();
        assert!(code.value() > 0);
        assert!(code.prefixes().count() <= BIG_ORIGIN_MAX_LEN);
    }

    #[test]
    fn test_origin_width_by_country() {
        let us = PostalCode::origin(Some("95126"), CountryId::UNITED_STATES).unwrap();
        assert_eq!(us.value(), 951);
        let au = PostalCode::origin(Some("2000"), CountryId::AUSTRALIA).unwrap();
        assert_eq!(au.value(), 2000);
    }

    #[test]
    fn test_big_origin_missing_is_empty() {
        let code = PostalCode::big_origin(None, CountryId::GERMANY);
        assert!(code.is_exhausted());
        assert_eq!(code.prefixes().count(), 0);
    }

    #[test]
    fn test_canonical_destination() {
        let us = PostalCode::canonical_destination(90067, CountryId::UNITED_STATES);
        assert_eq!(us.value(), 900);
        let de = PostalCode::canonical_destination(10115, CountryId::GERMANY);
        assert_eq!(de.value(), 101);
        let au = PostalCode::canonical_destination(2000, CountryId::AUSTRALIA);
        assert_eq!(au.value(), 2000);
        let small = PostalCode::canonical_destination(9545, CountryId(99));
        assert_eq!(small.value(), 9545);
        let large = PostalCode::canonical_destination(75001, CountryId(99));
        assert_eq!(large.value(), 750);
    }

    #[test]
    fn test_prefix_chain_decimal() {
        let chain: Vec<i32> = PostalCode::new(9545, PostalRadix::Decimal)
            .prefixes()
            .map(|p| p.value())
            .collect();
        assert_eq!(chain, vec![9545, 954, 95, 9]);
    }

    #[test]
    fn test_prefix_chain_alphanumeric() {
        let code = PostalCode::parse("SW1", PostalRadix::Alphanumeric, 3).unwrap();
        let chain: Vec<String> = code.prefixes().map(|p| p.to_string()).collect();
        assert_eq!(chain, vec!["SW1", "SW", "S"]);
    }

    #[test]
    fn test_truncation_reaches_zero_within_bounds() {
        for raw in ["0", "7", "2000", "9999", "95126"] {
            let origin = PostalCode::origin(Some(raw), CountryId::AUSTRALIA).unwrap();
            assert!(origin.prefixes().count() <= ORIGIN_MAX_LEN);
        }
        for raw in ["999999999", "12345678901", "1"] {
            let big = PostalCode::big_origin(Some(raw), CountryId::UNITED_STATES);
            assert!(big.prefixes().count() <= BIG_ORIGIN_MAX_LEN);
        }
    }
}
