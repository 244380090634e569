//! Console rendering of parse results.

use std::fmt::Write as _;

use gtin_core::{BarcodeInfo, FormatRegistry};
use serde::Serialize;

/// The result of parsing one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub input: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<BarcodeInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Parses every input against `registry`.
pub fn evaluate(registry: &FormatRegistry, inputs: &[String]) -> Vec<Outcome> {
    inputs
        .iter()
        .map(|input| {
            let info = registry
                .parse(input)
                .map_err(gtin_core::GtinError::from)
                .and_then(|barcode| barcode.info());

            match info {
                Ok(info) => Outcome {
                    input: input.clone(),
                    result: Some(info),
                    error: None,
                },
                Err(e) => {
                    tracing::debug!(input = %input, error = %e, "Barcode rejected");
                    Outcome {
                        input: input.clone(),
                        result: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}

/// One block per parsed barcode.
pub fn render_text(info: &BarcodeInfo) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}  {}", info.barcode, info.format);
    let _ = writeln!(out, "  area id     {}", info.area_id);
    let _ = writeln!(out, "  product id  {}", info.product_id);
    let _ = writeln!(out, "  checksum    {}", info.checksum);
    if let Some(price) = info.embedded_price {
        let _ = writeln!(out, "  price       {}", price);
    }
    if let Some(weight) = info.embedded_weight {
        let _ = writeln!(out, "  weight      {}", weight);
    }
    out
}

/// The stderr line for a failed input.
pub fn render_error(input: &str, error: &str) -> String {
    format!("{}: error: {}", input, error)
}

/// All outcomes as a pretty JSON array.
pub fn render_json(outcomes: &[Outcome]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcomes)
}
