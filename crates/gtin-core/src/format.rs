//! # Format Descriptors
//!
//! Static, per-format metadata: where each field sits in the digit string,
//! whether the format can carry an embedded price or weight, and which
//! checksum algorithm guards it.
//!
//! ## Field Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     UPC12 (packing order: End)                          │
//! │                                                                         │
//! │  index:   0 1 2 │ 3 4 5 6 7 │ 8 9 10 11                                │
//! │           ──────┼───────────┼──────────                                │
//! │           area  │ product   │ embedded value (price/weight)            │
//! │                                       └── 11 is also the check digit   │
//! │                                                                         │
//! │  area "208" → embedded price   area "234" → embedded weight            │
//! │  any other area → embedded region is read as extra product digits      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Declaring a Format
//! Descriptors are built with `const fn` setters, so a format is a plain
//! `static` that is defined once and never mutated:
//!
//! ```rust
//! use gtin_core::checksum::MODULO_10;
//! use gtin_core::format::{EmbeddedValuePackingOrder, FormatDescriptor};
//!
//! static STORE13: FormatDescriptor = FormatDescriptor::new("STORE13", 13, &MODULO_10)
//!     .product_id(3, 4)
//!     .embedded_value(7, 5, EmbeddedValuePackingOrder::End)
//!     .price_identifiers(&["20", "201"])
//!     .with_max_embedded_value(50000);
//!
//! assert!(STORE13.validate().is_ok());
//! assert_eq!(STORE13.checksum_index(), 12);
//! ```

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checksum::{ChecksumAlgorithm, MODULO_10};
use crate::error::FormatError;

/// Default length of the area id field.
pub const DEFAULT_AREA_ID_LENGTH: usize = 3;

/// Longest embedded field that still fits an `i64`.
const MAX_EMBEDDED_DIGITS: usize = 18;

// =============================================================================
// Packing Order
// =============================================================================

/// Where the embedded value sits relative to the product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedValuePackingOrder {
    /// The embedded value is stored after the product id.
    #[default]
    End,

    /// The embedded value is stored before the product id.
    Beginning,
}

// =============================================================================
// Embedded Value Type
// =============================================================================

/// What an embedded value means for a given area id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedValueType {
    /// Price in the smallest currency unit.
    Price,
    /// Weight, in whatever unit the issuing store uses.
    Weight,
}

impl fmt::Display for EmbeddedValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddedValueType::Price => write!(f, "price"),
            EmbeddedValueType::Weight => write!(f, "weight"),
        }
    }
}

// =============================================================================
// Format Descriptor
// =============================================================================

/// Immutable description of one barcode format.
///
/// ## Invariants (checked by [`validate`](FormatDescriptor::validate))
/// - every field span lies within `[0, total_length)`
/// - the checksum field matches the algorithm's checksum length
/// - when embedded values are unsupported, all embedded fields are inert
#[derive(Debug, Clone, Copy)]
pub struct FormatDescriptor {
    name: &'static str,
    total_length: usize,
    area_id_index: usize,
    area_id_length: usize,
    product_id_index: usize,
    product_id_length: usize,
    supports_embedded_value: bool,
    embedded_value_index: usize,
    embedded_value_length: usize,
    packing_order: EmbeddedValuePackingOrder,
    embedded_price_identifiers: &'static [&'static str],
    embedded_weight_identifiers: &'static [&'static str],
    max_embedded_value: i64,
    checksum_index: usize,
    checksum_length: usize,
    algorithm: &'static dyn ChecksumAlgorithm,
}

impl FormatDescriptor {
    /// Starts a descriptor with the defaults every format shares.
    ///
    /// ## Defaults
    /// - area id: index 0, length 3
    /// - product id: empty
    /// - no embedded value
    /// - checksum: one digit in the last position
    pub const fn new(
        name: &'static str,
        total_length: usize,
        algorithm: &'static dyn ChecksumAlgorithm,
    ) -> Self {
        FormatDescriptor {
            name,
            total_length,
            area_id_index: 0,
            area_id_length: DEFAULT_AREA_ID_LENGTH,
            product_id_index: 0,
            product_id_length: 0,
            supports_embedded_value: false,
            embedded_value_index: 0,
            embedded_value_length: 0,
            packing_order: EmbeddedValuePackingOrder::End,
            embedded_price_identifiers: &[],
            embedded_weight_identifiers: &[],
            max_embedded_value: 0,
            checksum_index: total_length.saturating_sub(1),
            checksum_length: 1,
            algorithm,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Sets the area id span.
    pub const fn area_id(mut self, index: usize, length: usize) -> Self {
        self.area_id_index = index;
        self.area_id_length = length;
        self
    }

    /// Sets the base product id span.
    pub const fn product_id(mut self, index: usize, length: usize) -> Self {
        self.product_id_index = index;
        self.product_id_length = length;
        self
    }

    /// Enables embedded values and sets their span.
    pub const fn embedded_value(
        mut self,
        index: usize,
        length: usize,
        packing_order: EmbeddedValuePackingOrder,
    ) -> Self {
        self.supports_embedded_value = true;
        self.embedded_value_index = index;
        self.embedded_value_length = length;
        self.packing_order = packing_order;
        self
    }

    /// Area ids that mark the embedded field as a price.
    pub const fn price_identifiers(mut self, identifiers: &'static [&'static str]) -> Self {
        self.embedded_price_identifiers = identifiers;
        self
    }

    /// Area ids that mark the embedded field as a weight.
    pub const fn weight_identifiers(mut self, identifiers: &'static [&'static str]) -> Self {
        self.embedded_weight_identifiers = identifiers;
        self
    }

    /// Inclusive upper bound for an embedded value.
    pub const fn with_max_embedded_value(mut self, max: i64) -> Self {
        self.max_embedded_value = max;
        self
    }

    /// Overrides the checksum span.
    pub const fn checksum(mut self, index: usize, length: usize) -> Self {
        self.checksum_index = index;
        self.checksum_length = length;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn total_length(&self) -> usize {
        self.total_length
    }

    #[inline]
    pub const fn area_id_index(&self) -> usize {
        self.area_id_index
    }

    #[inline]
    pub const fn area_id_length(&self) -> usize {
        self.area_id_length
    }

    #[inline]
    pub const fn product_id_index(&self) -> usize {
        self.product_id_index
    }

    #[inline]
    pub const fn product_id_length(&self) -> usize {
        self.product_id_length
    }

    #[inline]
    pub const fn supports_embedded_value(&self) -> bool {
        self.supports_embedded_value
    }

    #[inline]
    pub const fn embedded_value_index(&self) -> usize {
        self.embedded_value_index
    }

    #[inline]
    pub const fn embedded_value_length(&self) -> usize {
        self.embedded_value_length
    }

    #[inline]
    pub const fn packing_order(&self) -> EmbeddedValuePackingOrder {
        self.packing_order
    }

    #[inline]
    pub const fn embedded_price_identifiers(&self) -> &'static [&'static str] {
        self.embedded_price_identifiers
    }

    #[inline]
    pub const fn embedded_weight_identifiers(&self) -> &'static [&'static str] {
        self.embedded_weight_identifiers
    }

    #[inline]
    pub const fn max_embedded_value(&self) -> i64 {
        self.max_embedded_value
    }

    #[inline]
    pub const fn checksum_index(&self) -> usize {
        self.checksum_index
    }

    #[inline]
    pub const fn checksum_length(&self) -> usize {
        self.checksum_length
    }

    /// The checksum algorithm guarding this format.
    #[inline]
    pub fn algorithm(&self) -> &'static dyn ChecksumAlgorithm {
        self.algorithm
    }

    // =========================================================================
    // Spans
    // =========================================================================

    pub fn area_id_span(&self) -> Range<usize> {
        self.area_id_index..self.area_id_index + self.area_id_length
    }

    /// The area id code matched against the identifier sets while
    /// resolving: one digit shorter than the area id field.
    pub fn resolution_area_id_span(&self) -> Range<usize> {
        self.area_id_index..self.area_id_index + self.area_id_length.saturating_sub(1)
    }

    pub fn embedded_value_span(&self) -> Range<usize> {
        self.embedded_value_index..self.embedded_value_index + self.embedded_value_length
    }

    pub fn checksum_span(&self) -> Range<usize> {
        self.checksum_index..self.checksum_index + self.checksum_length
    }

    /// The product id span.
    ///
    /// With an embedded value present this is the plain product id field.
    /// Without one, the embedded region is reclaimed as product digits on
    /// the side given by the packing order.
    pub fn product_id_span(&self, has_embedded_value: bool) -> Range<usize> {
        if has_embedded_value {
            return self.product_id_index..self.product_id_index + self.product_id_length;
        }

        let widened = self.product_id_length + self.embedded_value_length;
        match self.packing_order {
            EmbeddedValuePackingOrder::End => {
                self.product_id_index..self.product_id_index + widened
            }
            EmbeddedValuePackingOrder::Beginning => {
                self.embedded_value_index..self.embedded_value_index + widened
            }
        }
    }

    // =========================================================================
    // Identifier Sets
    // =========================================================================

    /// Whether `area_id` marks an embedded price.
    pub fn is_price_identifier(&self, area_id: &str) -> bool {
        self.embedded_price_identifiers.contains(&area_id)
    }

    /// Whether `area_id` marks an embedded weight.
    pub fn is_weight_identifier(&self, area_id: &str) -> bool {
        self.embedded_weight_identifiers.contains(&area_id)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Checks the layout invariants.
    ///
    /// ## Rules
    /// - `total_length` is positive
    /// - area id, product id (both widths), embedded value and checksum
    ///   spans fit within `total_length`
    /// - the checksum span matches the algorithm's checksum length
    /// - embedded-capable formats have a 1..=18 digit embedded field, a
    ///   non-negative maximum and an area id of at least one digit
    /// - other formats leave every embedded field inert
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.total_length == 0 {
            return Err(self.invalid("total length must be positive".to_string()));
        }

        self.check_span("area id", self.area_id_span())?;
        self.check_span("product id", self.product_id_span(true))?;
        self.check_span("checksum", self.checksum_span())?;

        if self.checksum_length != self.algorithm.checksum_length() {
            return Err(self.invalid(format!(
                "checksum length {} does not match {} ({} digits)",
                self.checksum_length,
                self.algorithm.name(),
                self.algorithm.checksum_length()
            )));
        }

        if self.supports_embedded_value {
            if self.embedded_value_length == 0 || self.embedded_value_length > MAX_EMBEDDED_DIGITS {
                return Err(self.invalid(format!(
                    "embedded value length must be between 1 and {}",
                    MAX_EMBEDDED_DIGITS
                )));
            }
            if self.max_embedded_value < 0 {
                return Err(self.invalid("max embedded value must be non-negative".to_string()));
            }
            if self.area_id_length == 0 {
                return Err(self.invalid(
                    "area id is required to recognise embedded values".to_string(),
                ));
            }
            self.check_span("embedded value", self.embedded_value_span())?;
            self.check_span("product id (widened)", self.product_id_span(false))?;
        } else if self.embedded_value_index != 0
            || self.embedded_value_length != 0
            || !self.embedded_price_identifiers.is_empty()
            || !self.embedded_weight_identifiers.is_empty()
        {
            return Err(self.invalid(
                "embedded fields are set but embedded values are not supported".to_string(),
            ));
        }

        Ok(())
    }

    fn check_span(&self, field: &str, span: Range<usize>) -> Result<(), FormatError> {
        if span.end > self.total_length {
            return Err(self.invalid(format!(
                "{} span {}..{} exceeds length {}",
                field, span.start, span.end, self.total_length
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> FormatError {
        FormatError::InvalidDescriptor {
            name: self.name.to_string(),
            reason,
        }
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// Standard Formats
// =============================================================================

/// EAN-8: area id, five product digits, no embedded values.
pub static EAN8: FormatDescriptor = FormatDescriptor::new("EAN8", 8, &MODULO_10).product_id(3, 5);

/// UPC-12 with store-issued embedded prices (`208`) and weights (`234`).
pub static UPC12: FormatDescriptor = FormatDescriptor::new("UPC12", 12, &MODULO_10)
    .product_id(3, 5)
    .embedded_value(8, 4, EmbeddedValuePackingOrder::End)
    .price_identifiers(&["208"])
    .weight_identifiers(&["234"])
    .with_max_embedded_value(9999);

/// The standard formats, in resolution order.
pub static STANDARD_FORMATS: [&FormatDescriptor; 2] = [&EAN8, &UPC12];

/// Looks up a standard format by name (case-insensitive).
pub fn standard_format(name: &str) -> Option<&'static FormatDescriptor> {
    STANDARD_FORMATS
        .iter()
        .copied()
        .find(|format| format.name().eq_ignore_ascii_case(name))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_formats_are_valid() {
        for format in STANDARD_FORMATS {
            assert!(format.validate().is_ok(), "{} failed validation", format);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(EAN8.area_id_span(), 0..3);
        assert_eq!(EAN8.checksum_span(), 7..8);
        assert!(!EAN8.supports_embedded_value());
        assert_eq!(EAN8.embedded_value_length(), 0);
        assert!(EAN8.embedded_price_identifiers().is_empty());
        assert_eq!(EAN8.algorithm().name(), "MOD10");
    }

    #[test]
    fn test_upc12_layout() {
        assert_eq!(UPC12.product_id_span(true), 3..8);
        assert_eq!(UPC12.product_id_span(false), 3..12);
        assert_eq!(UPC12.embedded_value_span(), 8..12);
        assert_eq!(UPC12.resolution_area_id_span(), 0..2);
        assert!(UPC12.is_price_identifier("208"));
        assert!(UPC12.is_weight_identifier("234"));
        assert!(!UPC12.is_price_identifier("20"));
        assert_eq!(UPC12.max_embedded_value(), 9999);
    }

    #[test]
    fn test_max_embedded_value_builder_and_getter() {
        let format = FormatDescriptor::new("BOUND13", 13, &MODULO_10)
            .product_id(3, 4)
            .embedded_value(7, 5, EmbeddedValuePackingOrder::End)
            .weight_identifiers(&["23"])
            .with_max_embedded_value(42);
        assert_eq!(format.max_embedded_value(), 42);
        assert_eq!(EAN8.max_embedded_value(), 0);
        assert!(format.validate().is_ok());
    }

    #[test]
    fn test_beginning_packing_widens_from_embedded_index() {
        let format = FormatDescriptor::new("FRONT12", 12, &MODULO_10)
            .embedded_value(3, 4, EmbeddedValuePackingOrder::Beginning)
            .product_id(7, 4)
            .price_identifiers(&["208"])
            .with_max_embedded_value(9999);

        assert!(format.validate().is_ok());
        assert_eq!(format.product_id_span(true), 7..11);
        assert_eq!(format.product_id_span(false), 3..11);
    }

    #[test]
    fn test_validate_rejects_out_of_range_spans() {
        let format = FormatDescriptor::new("BAD", 8, &MODULO_10).product_id(3, 6);
        let err = format.validate().unwrap_err();
        assert!(matches!(err, FormatError::InvalidDescriptor { .. }));
        assert!(err.to_string().contains("product id span 3..9"));

        let format = FormatDescriptor::new("BAD", 8, &MODULO_10).checksum(8, 1);
        assert!(format.validate().is_err());

        let format = FormatDescriptor::new("EMPTY", 0, &MODULO_10);
        assert!(format.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_widened_span_overflow() {
        let format = FormatDescriptor::new("WIDE", 12, &MODULO_10)
            .product_id(3, 6)
            .embedded_value(8, 4, EmbeddedValuePackingOrder::End)
            .with_max_embedded_value(9999);
        assert!(format.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_live_embedded_fields_when_unsupported() {
        let format = FormatDescriptor::new("INERT", 8, &MODULO_10)
            .product_id(3, 4)
            .price_identifiers(&["20"]);
        assert!(format.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_checksum_length_mismatch() {
        let format = FormatDescriptor::new("TWO", 8, &MODULO_10).checksum(6, 2);
        let err = format.validate().unwrap_err();
        assert!(err.to_string().contains("does not match MOD10"));
    }

    #[test]
    fn test_standard_format_lookup() {
        assert_eq!(standard_format("ean8").map(|f| f.name()), Some("EAN8"));
        assert_eq!(standard_format("UPC12").map(|f| f.name()), Some("UPC12"));
        assert!(standard_format("EAN13").is_none());
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(UPC12.to_string(), "UPC12");
        assert_eq!(EmbeddedValueType::Price.to_string(), "price");
    }
}
