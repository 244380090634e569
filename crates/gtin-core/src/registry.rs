//! # Format Registry
//!
//! Holds the known formats and resolves a raw digit string to exactly one
//! of them.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve("208000021999")                                                │
//! │                                                                         │
//! │  for each format, in registration order:                               │
//! │     │                                                                   │
//! │     ├── length != total_length?              → next format             │
//! │     ├── algorithm.verify(s) fails?           → next format             │
//! │     ├── supports embedded value and the                                │
//! │     │   truncated area id is an identifier:                            │
//! │     │     embedded field < 0 or > max?       → next format             │
//! │     └── otherwise                            → MATCH (stop here)       │
//! │                                                                         │
//! │  nothing matched                             → None                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is first-match: among formats of the same length the one
//! registered first wins. A format that fails the embedded bound is
//! rejected outright, never downgraded to "no embedded value".
//!
//! ## Construct Once, Read Many
//! Registries are built completely before the first parse and never
//! mutated afterwards. [`standard_registry`] is the process-wide instance
//! behind [`crate::parse`]; it is initialised on first use and shared
//! without locking.

use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::barcode::Barcode;
use crate::error::{FormatError, ParseError};
use crate::format::{FormatDescriptor, STANDARD_FORMATS};

// =============================================================================
// Format Registry
// =============================================================================

/// An ordered set of barcode formats.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: Vec<&'static FormatDescriptor>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the standard formats (EAN8, then UPC12).
    pub fn standard() -> Self {
        FormatRegistry {
            formats: STANDARD_FORMATS.to_vec(),
        }
    }

    /// Appends a format. Later registrations lose ties against earlier ones.
    ///
    /// ## Errors
    /// - [`FormatError::InvalidDescriptor`] if the layout is inconsistent
    /// - [`FormatError::DuplicateName`] if the name is already taken
    pub fn register(
        &mut self,
        format: &'static FormatDescriptor,
    ) -> Result<&mut Self, FormatError> {
        format.validate()?;

        if self.get(format.name()).is_some() {
            return Err(FormatError::DuplicateName {
                name: format.name().to_string(),
            });
        }

        debug!(
            format = format.name(),
            length = format.total_length(),
            position = self.formats.len(),
            "Registered barcode format"
        );
        self.formats.push(format);
        Ok(self)
    }

    /// Looks up a registered format by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&'static FormatDescriptor> {
        self.formats
            .iter()
            .copied()
            .find(|format| format.name().eq_ignore_ascii_case(name))
    }

    /// Registered formats in resolution order.
    pub fn formats(&self) -> impl Iterator<Item = &'static FormatDescriptor> + '_ {
        self.formats.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Resolves a digit string to the first matching format.
    ///
    /// Pure: depends only on the registry contents and `s`.
    pub fn resolve(&self, s: &str) -> Option<&'static FormatDescriptor> {
        let resolved = self.formats().find(|format| matches_format(format, s));

        match resolved {
            Some(format) => debug!(barcode = s, format = format.name(), "Resolved barcode format"),
            None => debug!(barcode = s, "No barcode format matched"),
        }

        resolved
    }

    /// Parses raw input into a [`Barcode`].
    ///
    /// ## Errors
    /// - [`ParseError::NonDigitCharacter`] before any resolution attempt
    /// - [`ParseError::UnrecognizedFormat`] when no format matches, including
    ///   empty input
    pub fn parse(&self, raw: &str) -> Result<Barcode, ParseError> {
        if let Some((position, character)) = raw
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(ParseError::NonDigitCharacter {
                character,
                position,
            });
        }

        let format = self
            .resolve(raw)
            .ok_or_else(|| ParseError::UnrecognizedFormat {
                barcode: raw.to_string(),
            })?;

        Ok(Barcode::from_resolved(raw.to_string(), format))
    }

    /// Parses a numeric barcode, rendered in decimal without padding.
    ///
    /// ## Errors
    /// [`ParseError::NegativeValue`] before resolution for `value < 0`,
    /// otherwise as [`parse`](FormatRegistry::parse).
    pub fn parse_numeric(&self, value: i64) -> Result<Barcode, ParseError> {
        if value < 0 {
            return Err(ParseError::NegativeValue { value });
        }
        self.parse(&value.to_string())
    }
}

/// Checks one format against a candidate string.
fn matches_format(format: &FormatDescriptor, s: &str) -> bool {
    if s.len() != format.total_length() {
        trace!(format = format.name(), "Rejected: length mismatch");
        return false;
    }

    match format.algorithm().verify(s) {
        Ok(result) if result.is_valid => {}
        Ok(result) => {
            trace!(
                format = format.name(),
                computed = result.computed,
                "Rejected: checksum mismatch"
            );
            return false;
        }
        Err(e) => {
            trace!(format = format.name(), error = %e, "Rejected: malformed input");
            return false;
        }
    }

    if format.supports_embedded_value() {
        let code = &s[format.resolution_area_id_span()];
        if format.is_price_identifier(code) || format.is_weight_identifier(code) {
            let field = &s[format.embedded_value_span()];
            match field.parse::<i64>() {
                Ok(value) if (0..=format.max_embedded_value()).contains(&value) => {}
                Ok(value) => {
                    trace!(
                        format = format.name(),
                        value,
                        max = format.max_embedded_value(),
                        "Rejected: embedded value out of range"
                    );
                    return false;
                }
                Err(_) => {
                    trace!(format = format.name(), field, "Rejected: embedded value unreadable");
                    return false;
                }
            }
        }
    }

    true
}

// =============================================================================
// Process-Wide Registry
// =============================================================================

/// The shared standard registry, built on first use.
pub fn standard_registry() -> &'static FormatRegistry {
    static REGISTRY: OnceLock<FormatRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FormatRegistry::standard)
}

// =============================================================================
// Unit Tests
// =============================================================================
