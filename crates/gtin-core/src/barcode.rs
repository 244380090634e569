//! # Barcode
//!
//! The validated, queryable view over a raw digit string and its resolved
//! format.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "208000021999"                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FormatRegistry::parse ── digits? ── resolve ──► UPC12                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Barcode { raw, format: &'static UPC12 }                                │
//! │       │                                                                 │
//! │       ├── area_id()         "208"                                      │
//! │       ├── product_id()      "00002"   (embedded price present)         │
//! │       ├── embedded_price()  1999      ($19.99)                         │
//! │       └── checksum()        9                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Barcode` only exists after successful resolution, so its raw digits
//! always match the length and checksum of its format. Accessors slice the
//! raw string on every call; nothing is cached.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checksum::Verification;
use crate::error::{GtinError, GtinResult, ParseError};
use crate::format::{EmbeddedValueType, FormatDescriptor};
use crate::money::Money;
use crate::registry::standard_registry;
use crate::ABSENT_EMBEDDED_VALUE;

// =============================================================================
// Barcode
// =============================================================================

/// A parsed GTIN barcode.
///
/// ## Example
/// ```rust
/// use gtin_core::Barcode;
///
/// let barcode: Barcode = "96385074".parse().unwrap();
/// assert_eq!(barcode.format().name(), "EAN8");
/// assert_eq!(barcode.area_id(), "963");
/// assert_eq!(barcode.product_id(), "85074");
/// assert_eq!(barcode.checksum(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Barcode {
    raw: String,
    format: &'static FormatDescriptor,
}

impl Barcode {
    /// Parses a digit string against the standard registry.
    ///
    /// ## Errors
    /// - [`ParseError::NonDigitCharacter`] for anything outside `0`-`9`
    /// - [`ParseError::UnrecognizedFormat`] when no standard format matches
    pub fn new(raw: &str) -> Result<Self, ParseError> {
        standard_registry().parse(raw)
    }

    /// Pairs raw digits with the descriptor they resolved to.
    pub(crate) fn from_resolved(raw: String, format: &'static FormatDescriptor) -> Self {
        Barcode { raw, format }
    }

    /// The raw digits.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The resolved format.
    #[inline]
    pub fn format(&self) -> &'static FormatDescriptor {
        self.format
    }

    /// The geographic/area-class field.
    ///
    /// Area ids in the 20 range are store-specific and usually announce an
    /// embedded value.
    pub fn area_id(&self) -> &str {
        &self.raw[self.format.area_id_span()]
    }

    /// The product identifier.
    ///
    /// With an embedded price or weight this is the plain product id field.
    /// Otherwise the embedded region is reclaimed as extra product digits,
    /// so the length ranges from `product_id_length` to
    /// `product_id_length + embedded_value_length`.
    pub fn product_id(&self) -> &str {
        let has_embedded = self.has_embedded_price() || self.has_embedded_weight();
        &self.raw[self.format.product_id_span(has_embedded)]
    }

    /// The checksum digit(s) as stored in the barcode.
    pub fn checksum(&self) -> u32 {
        self.raw[self.format.checksum_span()]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    }

    /// Whether the area id marks an embedded price.
    pub fn has_embedded_price(&self) -> bool {
        self.format.supports_embedded_value() && self.format.is_price_identifier(self.area_id())
    }

    /// Whether the area id marks an embedded weight.
    pub fn has_embedded_weight(&self) -> bool {
        self.format.supports_embedded_value() && self.format.is_weight_identifier(self.area_id())
    }

    /// The kind of embedded value this barcode carries, if any.
    pub fn embedded_value_type(&self) -> Option<EmbeddedValueType> {
        if self.has_embedded_price() {
            Some(EmbeddedValueType::Price)
        } else if self.has_embedded_weight() {
            Some(EmbeddedValueType::Weight)
        } else {
            None
        }
    }

    /// The embedded price, or [`ABSENT_EMBEDDED_VALUE`] when there is none.
    ///
    /// ## Errors
    /// [`GtinError::CorruptEmbeddedValue`] if the field does not parse.
    pub fn embedded_price(&self) -> GtinResult<i64> {
        if !self.has_embedded_price() {
            return Ok(ABSENT_EMBEDDED_VALUE);
        }
        self.parse_embedded_field(EmbeddedValueType::Price)
    }

    /// The embedded weight, or [`ABSENT_EMBEDDED_VALUE`] when there is none.
    ///
    /// ## Errors
    /// [`GtinError::CorruptEmbeddedValue`] if the field does not parse.
    pub fn embedded_weight(&self) -> GtinResult<i64> {
        if !self.has_embedded_weight() {
            return Ok(ABSENT_EMBEDDED_VALUE);
        }
        self.parse_embedded_field(EmbeddedValueType::Weight)
    }

    /// The embedded value as a typed enum. Prices are read as cents.
    pub fn embedded_value(&self) -> GtinResult<Option<EmbeddedValue>> {
        let value = match self.embedded_value_type() {
            Some(EmbeddedValueType::Price) => Some(EmbeddedValue::Price(Money::from_cents(
                self.parse_embedded_field(EmbeddedValueType::Price)?,
            ))),
            Some(EmbeddedValueType::Weight) => Some(EmbeddedValue::Weight(
                self.parse_embedded_field(EmbeddedValueType::Weight)?,
            )),
            None => None,
        };
        Ok(value)
    }

    /// Re-verifies the checksum from the structured fields using the
    /// format's algorithm.
    pub fn verify_checksum(&self) -> GtinResult<Verification> {
        self.format.algorithm().verify_barcode(self)
    }

    /// Builds the serializable summary.
    pub fn info(&self) -> GtinResult<BarcodeInfo> {
        let (embedded_price, embedded_weight) = match self.embedded_value()? {
            Some(EmbeddedValue::Price(price)) => (Some(price), None),
            Some(EmbeddedValue::Weight(weight)) => (None, Some(weight)),
            None => (None, None),
        };

        Ok(BarcodeInfo {
            barcode: self.raw.clone(),
            format: self.format.name().to_string(),
            area_id: self.area_id().to_string(),
            product_id: self.product_id().to_string(),
            checksum: self.checksum(),
            embedded_price,
            embedded_weight,
        })
    }

    fn parse_embedded_field(&self, kind: EmbeddedValueType) -> GtinResult<i64> {
        let field = &self.raw[self.format.embedded_value_span()];
        field
            .parse::<i64>()
            .map_err(|_| GtinError::CorruptEmbeddedValue {
                kind,
                field: field.to_string(),
            })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Barcodes are equal when the digits and the resolved format are the same.
impl PartialEq for Barcode {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && std::ptr::eq(self.format, other.format)
    }
}

impl Eq for Barcode {}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Barcode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Barcode::new(s)
    }
}

impl TryFrom<&str> for Barcode {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Barcode::new(value)
    }
}

/// Numeric construction. Negative values are rejected before resolution.
impl TryFrom<i64> for Barcode {
    type Error = ParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        standard_registry().parse_numeric(value)
    }
}

// =============================================================================
// Embedded Value
// =============================================================================

/// A typed embedded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EmbeddedValue {
    /// Price in cents.
    Price(Money),
    /// Weight in the store's unit.
    Weight(i64),
}

// =============================================================================
// Barcode Info (DTO)
// =============================================================================

/// Serializable summary of a parsed barcode, for front-ends and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeInfo {
    /// The raw digits.
    pub barcode: String,

    /// Resolved format name.
    pub format: String,

    pub area_id: String,

    pub product_id: String,

    pub checksum: u32,

    /// Embedded price in cents, when present.
    pub embedded_price: Option<Money>,

    /// Embedded weight, when present.
    #[ts(type = "number | null")]
    pub embedded_weight: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::MODULO_10;
    use crate::format::EmbeddedValuePackingOrder;
    use crate::registry::FormatRegistry;

    static FRONT12: FormatDescriptor = FormatDescriptor::new("FRONT12", 12, &MODULO_10)
        .embedded_value(3, 4, EmbeddedValuePackingOrder::Beginning)
        .product_id(7, 4)
        .price_identifiers(&["208"])
        .with_max_embedded_value(9999);

    fn front_registry() -> FormatRegistry {
        let mut registry = FormatRegistry::new();
        registry.register(&FRONT12).unwrap();
        registry
    }

    #[test]
    fn test_ean8_fields() {
        let barcode = Barcode::new("96385074").unwrap();
        assert_eq!(barcode.format().name(), "EAN8");
        assert_eq!(barcode.area_id(), "963");
        assert_eq!(barcode.product_id(), "85074");
        assert_eq!(barcode.checksum(), 4);
        assert!(!barcode.has_embedded_price());
        assert!(!barcode.has_embedded_weight());
        assert_eq!(barcode.embedded_price().unwrap(), ABSENT_EMBEDDED_VALUE);
        assert_eq!(barcode.embedded_weight().unwrap(), ABSENT_EMBEDDED_VALUE);
        assert_eq!(barcode.embedded_value().unwrap(), None);
    }

    #[test]
    fn test_upc12_embedded_price() {
        let barcode = Barcode::new("208000021999").unwrap();
        assert_eq!(barcode.format().name(), "UPC12");
        assert!(barcode.has_embedded_price());
        assert!(!barcode.has_embedded_weight());
        assert_eq!(barcode.embedded_price().unwrap(), 1999);
        assert_eq!(barcode.embedded_weight().unwrap(), ABSENT_EMBEDDED_VALUE);
        assert_eq!(barcode.product_id(), "00002");
        assert_eq!(barcode.checksum(), 9);
        assert_eq!(
            barcode.embedded_value().unwrap(),
            Some(EmbeddedValue::Price(Money::from_cents(1999)))
        );
    }

    #[test]
    fn test_upc12_embedded_weight() {
        let barcode = Barcode::new("234000020755").unwrap();
        assert!(barcode.has_embedded_weight());
        assert_eq!(barcode.embedded_weight().unwrap(), 755);
        assert_eq!(barcode.embedded_price().unwrap(), ABSENT_EMBEDDED_VALUE);
        assert_eq!(barcode.embedded_value_type(), Some(EmbeddedValueType::Weight));
        assert_eq!(barcode.product_id(), "00002");
    }

    #[test]
    fn test_upc12_without_embedded_value_widens_product_id() {
        let barcode = Barcode::new("012345678905").unwrap();
        assert_eq!(barcode.area_id(), "012");
        assert!(!barcode.has_embedded_price());
        assert!(!barcode.has_embedded_weight());
        assert_eq!(barcode.product_id(), "345678905");
        assert_eq!(barcode.product_id().len(), 9);
    }

    #[test]
    fn test_beginning_packing_order() {
        let registry = front_registry();

        let priced = registry.parse("208555501236").unwrap();
        assert!(priced.has_embedded_price());
        assert_eq!(priced.embedded_price().unwrap(), 5555);
        assert_eq!(priced.product_id(), "0123");

        let plain = registry.parse("012999901237").unwrap();
        assert!(!plain.has_embedded_price());
        assert_eq!(plain.product_id(), "99990123");
    }

    #[test]
    fn test_corrupt_embedded_value_is_reported() {
        // Only reachable by pairing digits with a format directly.
        let barcode = Barcode::from_resolved("20855x501236".to_string(), &FRONT12);
        let err = barcode.embedded_price().unwrap_err();
        assert_eq!(
            err,
            GtinError::CorruptEmbeddedValue {
                kind: EmbeddedValueType::Price,
                field: "55x5".to_string(),
            }
        );
        assert!(barcode.embedded_value().is_err());
        assert!(barcode.info().is_err());
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let barcode = Barcode::new("208000021999").unwrap();
        assert_eq!(barcode.area_id(), barcode.area_id());
        assert_eq!(barcode.product_id(), barcode.product_id());
        assert_eq!(barcode.checksum(), barcode.checksum());
        assert_eq!(barcode.embedded_price(), barcode.embedded_price());
        assert_eq!(barcode.info(), barcode.info());
    }

    #[test]
    fn test_non_digit_and_unrecognized() {
        assert_eq!(
            Barcode::new("9638A074").unwrap_err(),
            ParseError::NonDigitCharacter {
                character: 'A',
                position: 4
            }
        );
        assert!(matches!(
            Barcode::new("96385075"),
            Err(ParseError::UnrecognizedFormat { .. })
        ));
    }

    #[test]
    fn test_conversions() {
        let parsed: Barcode = "96385074".parse().unwrap();
        let converted = Barcode::try_from("96385074").unwrap();
        let numeric = Barcode::try_from(96385074_i64).unwrap();
        assert_eq!(parsed, converted);
        assert_eq!(parsed, numeric);
        assert_eq!(parsed.to_string(), "96385074");
        assert_eq!(parsed.as_ref(), "96385074");

        assert_eq!(
            Barcode::try_from(-96385074_i64).unwrap_err(),
            ParseError::NegativeValue { value: -96385074 }
        );
    }

    #[test]
    fn test_verify_checksum_delegates_to_algorithm() {
        let barcode = Barcode::new("96385074").unwrap();
        let result = barcode.verify_checksum().unwrap();
        assert_eq!(result.computed, 2);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_info_serializes_camel_case() {
        let info = Barcode::new("208000021999").unwrap().info().unwrap();
        assert_eq!(info.embedded_price, Some(Money::from_cents(1999)));
        assert_eq!(info.embedded_weight, None);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["format"], "UPC12");
        assert_eq!(json["areaId"], "208");
        assert_eq!(json["productId"], "00002");
        assert_eq!(json["checksum"], 9);
        assert_eq!(json["embeddedPrice"], 1999);
        assert!(json["embeddedWeight"].is_null());
    }

    #[test]
    fn test_embedded_value_serialization() {
        let json = serde_json::to_value(EmbeddedValue::Weight(755)).unwrap();
        assert_eq!(json["type"], "weight");
        assert_eq!(json["value"], 755);
    }
}
