//! # gtin-core: Pure GTIN Barcode Logic
//!
//! Classifies, parses and validates fixed-length numeric product barcodes
//! (EAN-8, UPC-12 and custom GTIN-style formats). All logic is pure, with
//! zero I/O dependencies.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        gtin-core (leaf first)                           │
//! │                                                                         │
//! │   ┌───────────┐   ┌───────────┐   ┌───────────┐   ┌───────────┐        │
//! │   │ checksum  │──►│  format   │──►│ registry  │──►│  barcode  │        │
//! │   │ Modulo10  │   │ EAN8      │   │ resolve   │   │ area_id   │        │
//! │   │ verify    │   │ UPC12     │   │ parse     │   │ product_id│        │
//! │   └───────────┘   └───────────┘   └───────────┘   └───────────┘        │
//! │                                                                         │
//! │   "96385074" ──► resolve ──► EAN8 ──► Barcode ──► fields              │
//! │                                                                         │
//! │   NO I/O • NO GLOBAL MUTABLE STATE • PURE FUNCTIONS                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checksum`] - Checksum algorithm trait and Modulo-10
//! - [`format`] - Format descriptors and the standard formats
//! - [`registry`] - Ordered format registry and resolution
//! - [`barcode`] - The parsed barcode and its field accessors
//! - [`money`] - Integer-cent money for embedded prices
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gtin_core::parse;
//!
//! let barcode = parse("208000021999").unwrap();
//! assert_eq!(barcode.format().name(), "UPC12");
//! assert!(barcode.has_embedded_price());
//! assert_eq!(barcode.embedded_price().unwrap(), 1999);
//!
//! let plain = parse("96385074").unwrap();
//! assert_eq!(plain.product_id(), "85074");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod barcode;
pub mod checksum;
pub mod error;
pub mod format;
pub mod money;
pub mod registry;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use barcode::{Barcode, BarcodeInfo, EmbeddedValue};
pub use checksum::{ChecksumAlgorithm, Modulo10, Verification, MODULO_10};
pub use error::{ChecksumError, FormatError, GtinError, GtinResult, ParseError};
pub use format::{EmbeddedValuePackingOrder, EmbeddedValueType, FormatDescriptor, EAN8, UPC12};
pub use money::Money;
pub use registry::{standard_registry, FormatRegistry};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Returned by the embedded price/weight accessors when the barcode does
/// not carry that kind of value.
pub const ABSENT_EMBEDDED_VALUE: i64 = -1;

// =============================================================================
// Entry Point
// =============================================================================

/// Parses a digit string against the standard registry.
///
/// This is the input boundary of the crate: only strings of decimal digits
/// are accepted.
pub fn parse(raw_digits: &str) -> Result<Barcode, ParseError> {
    standard_registry().parse(raw_digits)
}
