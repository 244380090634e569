//! # Checksum Module
//!
//! Checksum algorithms that compute and verify the trailing check digit of
//! a GTIN-style barcode.
//!
//! ## Algorithm Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ChecksumAlgorithm (trait)                           │
//! │                                                                         │
//! │   compute(payload)        "9638507"      ──► 4                         │
//! │   verify(full)            "96385074"     ──► valid, computed 4         │
//! │   verify_barcode(&b)      area + product [+ embedded] ──► recompute    │
//! │   append_checksum(p)      "9638507"      ──► "96385074"               │
//! │                                                                         │
//! │   Implementations:                                                     │
//! │   └── Modulo10   weights 3,1,3,1,... from the rightmost payload digit  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Algorithms are stateless. Formats hold them as `&'static dyn
//! ChecksumAlgorithm`, so one zero-sized value serves every caller.
//!
//! ## Usage
//! ```rust
//! use gtin_core::checksum::{ChecksumAlgorithm, MODULO_10};
//!
//! assert_eq!(MODULO_10.compute("9638507").unwrap(), 4);
//!
//! let result = MODULO_10.verify("96385074").unwrap();
//! assert!(result.is_valid);
//! ```

use std::fmt;

use crate::barcode::Barcode;
use crate::error::{ChecksumError, ChecksumResult, GtinResult};

// =============================================================================
// Verification Result
// =============================================================================

/// Outcome of a checksum verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// Whether the claimed checksum equals the computed one.
    pub is_valid: bool,

    /// The checksum the algorithm computed from the payload.
    pub computed: u32,
}

// =============================================================================
// Checksum Algorithm Trait
// =============================================================================

/// An algorithm capable of generating and verifying check digits.
///
/// Only [`compute`](ChecksumAlgorithm::compute) and
/// [`name`](ChecksumAlgorithm::name) are required; the verification entry
/// points are derived from them.
pub trait ChecksumAlgorithm: fmt::Debug + Send + Sync {
    /// Short identifier, e.g. `"MOD10"`.
    fn name(&self) -> &'static str;

    /// Number of trailing digits the checksum occupies.
    fn checksum_length(&self) -> usize {
        1
    }

    /// Computes the expected checksum for a payload that excludes the
    /// checksum digit(s).
    ///
    /// ## Errors
    /// [`ChecksumError::MalformedInput`] when `payload` contains anything
    /// other than ASCII digits.
    fn compute(&self, payload: &str) -> ChecksumResult<u32>;

    /// Verifies a full digit string whose last
    /// [`checksum_length`](ChecksumAlgorithm::checksum_length) digits are the
    /// claimed checksum.
    fn verify(&self, full: &str) -> ChecksumResult<Verification> {
        let checksum_length = self.checksum_length();
        ensure_digits(full)?;

        if full.len() < checksum_length {
            return Err(ChecksumError::MalformedInput {
                reason: format!(
                    "'{}' is shorter than the {}-digit checksum field",
                    full, checksum_length
                ),
            });
        }

        let split = full.len() - checksum_length;
        let (payload, claimed) = full.split_at(split);
        let computed = self.compute(payload)?;
        let claimed = digits_value(claimed)?;

        Ok(Verification {
            is_valid: computed == claimed,
            computed,
        })
    }

    /// Verifies a parsed barcode from its structured fields.
    ///
    /// The payload is rebuilt as `area_id + product_id`, followed by the
    /// decimal rendering of the embedded price and then the embedded weight,
    /// each appended only when the barcode is flagged as carrying it. The
    /// rendering drops leading zeros, so this can disagree with
    /// [`verify`](ChecksumAlgorithm::verify) on the raw digits.
    fn verify_barcode(&self, barcode: &Barcode) -> GtinResult<Verification> {
        let payload = structured_payload(barcode)?;
        let computed = self.compute(&payload)?;

        Ok(Verification {
            is_valid: computed == barcode.checksum(),
            computed,
        })
    }

    /// Returns `payload` with its computed checksum appended, zero-padded to
    /// the checksum length.
    fn append_checksum(&self, payload: &str) -> ChecksumResult<String> {
        let checksum = self.compute(payload)?;
        Ok(format!(
            "{}{:0width$}",
            payload,
            checksum,
            width = self.checksum_length()
        ))
    }
}

/// Rebuilds the checksum payload of a parsed barcode from its fields.
pub fn structured_payload(barcode: &Barcode) -> GtinResult<String> {
    let mut payload = barcode.area_id().to_string();
    payload.push_str(barcode.product_id());

    if barcode.has_embedded_price() {
        payload.push_str(&barcode.embedded_price()?.to_string());
    }

    if barcode.has_embedded_weight() {
        payload.push_str(&barcode.embedded_weight()?.to_string());
    }

    Ok(payload)
}

// =============================================================================
// Modulo 10
// =============================================================================

/// The GS1 Modulo-10 check digit.
///
/// ## Weighting
/// ```text
/// payload:   9   6   3   8   5   0   7
/// weight:    3   1   3   1   3   1   3    ← 3 on the rightmost digit
/// product:  27 + 6 + 9 + 8 +15 + 0 +21 = 86
///
/// checksum = (10 - 86 % 10) % 10 = 4
/// ```
/// A sum that is already a multiple of ten yields `0`, never `10`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modulo10;

/// Shared Modulo-10 instance used by every standard format.
pub static MODULO_10: Modulo10 = Modulo10;

impl ChecksumAlgorithm for Modulo10 {
    fn name(&self) -> &'static str {
        "MOD10"
    }

    fn compute(&self, payload: &str) -> ChecksumResult<u32> {
        let len = payload.len();
        let mut sum: u32 = 0;

        for (i, c) in payload.chars().enumerate() {
            let digit = c.to_digit(10).ok_or_else(|| non_digit(payload, c))?;
            let weight = if (len - i) % 2 == 0 { 1 } else { 3 };
            sum += digit * weight;
        }

        Ok((10 - sum % 10) % 10)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn non_digit(input: &str, c: char) -> ChecksumError {
    ChecksumError::MalformedInput {
        reason: format!("'{}' contains non-digit character '{}'", input, c),
    }
}

fn ensure_digits(input: &str) -> ChecksumResult<()> {
    match input.chars().find(|c| !c.is_ascii_digit()) {
        Some(c) => Err(non_digit(input, c)),
        None => Ok(()),
    }
}

fn digits_value(digits: &str) -> ChecksumResult<u32> {
    digits.parse().map_err(|_| ChecksumError::MalformedInput {
        reason: format!("'{}' is not a checksum value", digits),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FormatRegistry;

    #[test]
    fn test_compute_ean8_payload() {
        assert_eq!(MODULO_10.compute("9638507").unwrap(), 4);
        assert_eq!(MODULO_10.compute("01234567890").unwrap(), 5);
    }

    #[test]
    fn test_multiple_of_ten_gives_zero() {
        // 4*3 + 6*3 = 30
        assert_eq!(MODULO_10.compute("4000006").unwrap(), 0);
        assert_eq!(MODULO_10.compute("").unwrap(), 0);
        assert_eq!(MODULO_10.compute("0000000").unwrap(), 0);
    }

    #[test]
    fn test_verify_reports_computed_digit() {
        let ok = MODULO_10.verify("96385074").unwrap();
        assert_eq!(
            ok,
            Verification {
                is_valid: true,
                computed: 4
            }
        );

        let bad = MODULO_10.verify("96385075").unwrap();
        assert!(!bad.is_valid);
        assert_eq!(bad.computed, 4);
    }

    #[test]
    fn test_verify_rejects_malformed_input() {
        assert!(matches!(
            MODULO_10.verify(""),
            Err(ChecksumError::MalformedInput { .. })
        ));
        assert!(matches!(
            MODULO_10.verify("9638A074"),
            Err(ChecksumError::MalformedInput { .. })
        ));
        // Multi-byte characters must not reach the byte split
        assert!(MODULO_10.verify("12é").is_err());
        assert!(MODULO_10.compute("12 3").is_err());
    }

    #[test]
    fn test_single_digit_input_is_all_checksum() {
        // Empty payload computes to 0
        assert!(MODULO_10.verify("0").unwrap().is_valid);
        assert!(!MODULO_10.verify("7").unwrap().is_valid);
    }

    #[test]
    fn test_append_checksum() {
        assert_eq!(MODULO_10.append_checksum("9638507").unwrap(), "96385074");
        assert_eq!(
            MODULO_10.append_checksum("01234567890").unwrap(),
            "012345678905"
        );
        assert!(MODULO_10.append_checksum("12x").is_err());
    }

    #[test]
    fn test_verify_barcode_uses_structured_fields() {
        let registry = FormatRegistry::standard();
        let barcode = registry.parse("96385074").unwrap();

        // EAN-8 product id spans the check digit, so the structured payload
        // is all eight digits.
        assert_eq!(structured_payload(&barcode).unwrap(), "96385074");
        let result = MODULO_10.verify_barcode(&barcode).unwrap();
        assert_eq!(
            result,
            Verification {
                is_valid: false,
                computed: 2
            }
        );
    }

    #[test]
    fn test_structured_payload_appends_embedded_price() {
        let registry = FormatRegistry::standard();
        let barcode = registry.parse("208000021999").unwrap();
        assert!(barcode.has_embedded_price());
        assert_eq!(structured_payload(&barcode).unwrap(), "208000021999");
    }

    #[test]
    fn test_name() {
        assert_eq!(MODULO_10.name(), "MOD10");
        assert_eq!(MODULO_10.checksum_length(), 1);
    }
}
