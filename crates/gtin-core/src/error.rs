//! # Error Types
//!
//! Domain-specific error types for gtin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gtin-core errors (this file)                                          │
//! │  ├── GtinError        - Umbrella for everything below                  │
//! │  │   └── CorruptEmbeddedValue (internal invariant violation)           │
//! │  ├── ParseError       - Raw input rejected by `parse`                  │
//! │  ├── ChecksumError    - Checksum layer given malformed digits          │
//! │  └── FormatError      - Descriptor rejected at registration            │
//! │                                                                         │
//! │  gtin-cli errors (separate crate)                                      │
//! │  └── ConfigError      - Configuration load/validation failures         │
//! │                                                                         │
//! │  Flow: ParseError → GtinError → anyhow (CLI) → stderr                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (barcode, position, format name)
//! 3. Errors are enum variants, never String
//! 4. Nothing is retried: every check here is a pure function of its input

use thiserror::Error;

use crate::format::EmbeddedValueType;

// =============================================================================
// Gtin Error
// =============================================================================

/// Top-level error for gtin-core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GtinError {
    /// Raw input could not be turned into a [`Barcode`](crate::Barcode).
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The checksum layer was handed something that is not a digit string.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// A format descriptor was rejected by the registry.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// An embedded value flagged as present does not parse as an integer.
    ///
    /// ## When This Occurs
    /// Never, for a barcode produced by the registry. Seeing it means the
    /// resolution checks and the accessors disagree about the layout.
    #[error("Embedded {kind} field '{field}' is not an integer; the barcode may be corrupt")]
    CorruptEmbeddedValue {
        kind: EmbeddedValueType,
        field: String,
    },
}

// =============================================================================
// Parse Error
// =============================================================================

/// Input rejected at the `parse` boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input contains a character outside `0`-`9`.
    ///
    /// Detected before any format resolution is attempted.
    #[error("Barcode may only contain digits: found '{character}' at position {position}")]
    NonDigitCharacter { character: char, position: usize },

    /// Well-formed digits that match no registered format.
    #[error("Failed to determine the format of barcode '{barcode}'")]
    UnrecognizedFormat { barcode: String },

    /// Numeric input below zero.
    #[error("Barcode must be a non-negative integer, got {value}")]
    NegativeValue { value: i64 },
}

// =============================================================================
// Checksum Error
// =============================================================================

/// Checksum layer failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// Input shorter than the checksum field, or containing non-digits.
    #[error("Malformed checksum input: {reason}")]
    MalformedInput { reason: String },
}

// =============================================================================
// Format Error
// =============================================================================

/// Registration-time descriptor failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A field span falls outside the barcode, or lengths are inconsistent.
    #[error("Format {name} is invalid: {reason}")]
    InvalidDescriptor { name: String, reason: String },

    /// Two descriptors share a name.
    #[error("Format {name} is already registered")]
    DuplicateName { name: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with GtinError.
pub type GtinResult<T> = Result<T, GtinError>;

/// Result type for checksum computations.
pub type ChecksumResult<T> = Result<T, ChecksumError>;

// =============================================================================
// Unit Tests
// =============================================================================
