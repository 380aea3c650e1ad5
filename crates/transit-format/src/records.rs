//! Row records of the static tables.
//!
//! Each row type is a flat record as it appears in a table file. Postal
//! codes in extracts may be stored either pre-normalized or as raw text
//! (see [`ZipField`]); the loader normalizes them per country.

use std::io::{self, Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use transit_types::{CountryId, HistoricalAverages, PostalCode, ServiceEstimate, ServiceId};

use crate::BinaryField;
use crate::binary::binary_record;

/// A postal code column: a normalized integer or the raw text of the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZipField {
    /// Already-normalized code.
    Code(i32),
    /// Raw postal code text, normalized with the country's radix on load.
    Text(String),
}

impl ZipField {
    const CODE_TAG: u8 = 0;
    const TEXT_TAG: u8 = 1;

    /// Returns the normalized value for a country, or `None` for empty text.
    #[must_use]
    pub fn normalize(&self, country: CountryId) -> Option<i32> {
        match self {
            Self::Code(value) => Some(*value),
            Self::Text(text) => PostalCode::from_table_text(text, country).map(|c| c.value()),
        }
    }
}

impl From<i32> for ZipField {
    fn from(value: i32) -> Self {
        Self::Code(value)
    }
}

impl From<&str> for ZipField {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl BinaryField for ZipField {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        match u8::read_from(reader)? {
            Self::CODE_TAG => i32::read_from(reader).map(Self::Code),
            Self::TEXT_TAG => String::read_from(reader).map(Self::Text),
            tag => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown postal code tag {tag}"),
            )),
        }
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Self::Code(value) => {
                Self::CODE_TAG.write_to(writer)?;
                value.write_to(writer)
            }
            Self::Text(text) => {
                Self::TEXT_TAG.write_to(writer)?;
                text.write_to(writer)
            }
        }
    }
}

/// Per-service default estimate and working-day flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfoRow {
    /// Shipping service.
    pub service: ServiceId,
    /// Minimum delivery hours.
    pub min_hours: i16,
    /// Maximum delivery hours.
    pub max_hours: i16,
    /// Working-day flags (Sunday = bit 6 .. Saturday = bit 0).
    pub working_days: u8,
}

binary_record!(ServiceInfoRow {
    service,
    min_hours,
    max_hours,
    working_days
});

/// Cross-border estimate for a country pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPairRow {
    /// Shipping service.
    pub service: ServiceId,
    /// Origin country.
    pub origin_country: CountryId,
    /// Destination country.
    pub dest_country: CountryId,
    /// Hour bounds.
    #[serde(flatten)]
    pub estimate: ServiceEstimate,
}

binary_record!(CountryPairRow {
    service,
    origin_country,
    dest_country,
    estimate
});

/// Member of the set of (origin, destination, service) triples allowed to
/// use the postal-code cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePairRow {
    /// Origin country.
    pub origin_country: CountryId,
    /// Destination country.
    pub dest_country: CountryId,
    /// Shipping service.
    pub service: ServiceId,
}

binary_record!(ServicePairRow {
    origin_country,
    dest_country,
    service
});

/// Exact zip-to-zip estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipPairRow {
    /// Shipping service.
    pub service: ServiceId,
    /// Origin country.
    pub origin_country: CountryId,
    /// Destination country.
    pub dest_country: CountryId,
    /// Origin postal code.
    pub origin_zip: ZipField,
    /// Destination postal code.
    pub dest_zip: ZipField,
    /// Hour bounds.
    #[serde(flatten)]
    pub estimate: ServiceEstimate,
}

binary_record!(ZipPairRow {
    service,
    origin_country,
    dest_country,
    origin_zip,
    dest_zip,
    estimate
});

/// Inclusive range of postal codes forming one bucket.
///
/// Every code in `start..=end` maps to the bucket `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipRangeRow {
    /// Country of the codes.
    pub country: CountryId,
    /// First code of the range; also the bucket's canonical code.
    pub start: ZipField,
    /// Last code of the range.
    pub end: ZipField,
}

binary_record!(ZipRangeRow {
    country,
    start,
    end
});

/// Estimate between two range buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEstimateRow {
    /// Shipping service.
    pub service: ServiceId,
    /// Origin country.
    pub origin_country: CountryId,
    /// Destination country.
    pub dest_country: CountryId,
    /// Canonical origin bucket.
    pub origin_bucket: ZipField,
    /// Canonical destination bucket.
    pub dest_bucket: ZipField,
    /// Hour bounds.
    #[serde(flatten)]
    pub estimate: ServiceEstimate,
}

binary_record!(RangeEstimateRow {
    service,
    origin_country,
    dest_country,
    origin_bucket,
    dest_bucket,
    estimate
});

/// Estimate from an origin code to anywhere in the destination country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginZipRow {
    /// Shipping service.
    pub service: ServiceId,
    /// Origin country.
    pub origin_country: CountryId,
    /// Destination country.
    pub dest_country: CountryId,
    /// Origin postal code.
    pub origin_zip: ZipField,
    /// Hour bounds.
    #[serde(flatten)]
    pub estimate: ServiceEstimate,
}

binary_record!(OriginZipRow {
    service,
    origin_country,
    dest_country,
    origin_zip,
    estimate
});

/// Estimate for a destination inside an exclusion zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRow {
    /// Shipping service.
    pub service: ServiceId,
    /// Destination country.
    pub dest_country: CountryId,
    /// Destination postal code.
    pub dest_zip: ZipField,
    /// Hour bounds.
    #[serde(flatten)]
    pub estimate: ServiceEstimate,
}

binary_record!(ExclusionRow {
    service,
    dest_country,
    dest_zip,
    estimate
});

/// Maps a service to its base service within a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseServiceRow {
    /// Country of the service.
    pub country: CountryId,
    /// Listed shipping service.
    pub service: ServiceId,
    /// Canonical base service.
    pub base_service: ServiceId,
}

binary_record!(BaseServiceRow {
    country,
    service,
    base_service
});

/// One holiday of one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRow {
    /// Country observing the holiday.
    pub country: CountryId,
    /// Calendar date.
    pub date: NaiveDate,
}

binary_record!(HolidayRow { country, date });

/// Historical averages for one key of a history table.
///
/// `K` is `i64` for seller and category ids, `i32` for shipping method ids,
/// `(i32, i32)` for zip pairs and `(i32, i32, i32)` for method + zip pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow<K> {
    /// Table key.
    pub key: K,
    /// Averages in hours.
    pub averages: HistoricalAverages,
}

impl<K: BinaryField> BinaryField for HistoryRow<K> {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            key: K::read_from(reader)?,
            averages: HistoricalAverages::read_from(reader)?,
        })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.key.write_to(writer)?;
        self.averages.write_to(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TableFormat, read_records_from, write_records_to};
    use std::io::Cursor;

    #[test]
    fn test_zip_field_accepts_numbers_and_text() {
        let rows: Vec<ZipRangeRow> = serde_json::from_str(
            r#"[{"country": 3, "start": "SW1", "end": "SW9"},
                {"country": 1, "start": 90001, "end": 90210}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].start, ZipField::Text("SW1".into()));
        assert_eq!(rows[1].end, ZipField::Code(90210));
        assert_eq!(
            rows[0].start.normalize(CountryId::UNITED_KINGDOM),
            Some((28 * 36 + 32) * 36 + 1)
        );
        assert_eq!(ZipField::from("").normalize(CountryId::UNITED_STATES), None);
    }

    #[test]
    fn test_estimate_columns_are_flat_in_json() {
        let row = ExclusionRow {
            service: ServiceId(3),
            dest_country: CountryId::UNITED_STATES,
            dest_zip: ZipField::Code(99_501),
            estimate: ServiceEstimate::new(72, 168),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["min_hours"], 72);
        assert_eq!(value["max_hours"], 168);
    }

    #[test]
    fn test_mixed_zip_fields_in_binary() {
        let rows = vec![ZipPairRow {
            service: ServiceId(1),
            origin_country: CountryId::UNITED_KINGDOM,
            dest_country: CountryId::UNITED_KINGDOM,
            origin_zip: "EC1A".into(),
            dest_zip: ZipField::Code(1234),
            estimate: ServiceEstimate::new(24, 48),
        }];
        let mut bytes = Vec::new();
        write_records_to(&rows, &mut bytes, TableFormat::Binary).unwrap();
        let back: Vec<ZipPairRow> =
            read_records_from(Cursor::new(bytes), TableFormat::Binary).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_history_row_tuple_key() {
        let json = r#"[{"key": [7, 945, 100], "averages": [50, 1, 2, 3, 4, 5, 6, 7]}]"#;
        let rows: Vec<HistoryRow<(i32, i32, i32)>> =
            read_records_from(Cursor::new(json), TableFormat::Json).unwrap();
        assert_eq!(rows[0].key, (7, 945, 100));
        assert_eq!(rows[0].averages.total(), 50);
    }
}
