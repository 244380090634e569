//! Barcode input loading: arguments, a file, or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

/// Extracts barcodes from text, one per line.
///
/// Surrounding whitespace is trimmed; blank lines and `#` comments are
/// skipped.
pub fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads barcodes from a file.
pub fn read_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read barcode file {}", path.display()))?;
    let barcodes = parse_lines(&contents);
    debug!(path = %path.display(), count = barcodes.len(), "Loaded barcodes from file");
    Ok(barcodes)
}

/// Reads barcodes from stdin until EOF.
pub fn read_stdin() -> anyhow::Result<Vec<String>> {
    let mut contents = String::new();
    std::io::stdin()
        .read_to_string(&mut contents)
        .context("Failed to read barcodes from stdin")?;
    Ok(parse_lines(&contents))
}

/// Collects inputs: positional arguments first, then the file. Falls back
/// to stdin when neither is given.
pub fn collect(args: &[String], file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut barcodes: Vec<String> = args.iter().map(|a| a.trim().to_string()).collect();

    if let Some(path) = file {
        barcodes.extend(read_file(path)?);
    } else if barcodes.is_empty() {
        barcodes = read_stdin()?;
    }

    Ok(barcodes)
}
