//! # Money Module
//!
//! Provides the `Money` type used for prices embedded in store barcodes.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EMBEDDED PRICES ARE ALREADY INTEGERS                                   │
//! │                                                                         │
//! │  Barcode 208000021999                                                   │
//! │                  └──┘ embedded field "1999"                             │
//! │                                                                         │
//! │  Read as cents: 1999 → $19.99                                           │
//! │  No float ever touches the value, so nothing is lost on the way in.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gtin_core::money::Money;
//!
//! let price = Money::from_cents(1999);
//! assert_eq!(price.dollars(), 19);
//! assert_eq!(price.to_string(), "$19.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use gtin_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1999).dollars(), 19);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        self.0 % 100
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC`.
///
/// ## Note
/// This is for logs and the CLI. Front-ends should format `cents()`
/// themselves to handle localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.dollars(), self.cents_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
