//! Candidate medicine-name extraction from OCR'd label text.
//!
//! OCR itself happens client-side; the server only receives the raw
//! extracted text. The extraction ladder tries labelled patterns first,
//! then a standalone capitalized line, then a scan for known catalog
//! names, then falls back to the first non-empty line. The candidate is
//! normalized and looked up by the caller; extraction itself never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Catalog;

/// Labelled patterns seen on medication packaging, in priority order.
/// The standalone-capitalized-line pattern sits mid-ladder on purpose:
/// a "Brand name:" line should win over an arbitrary heading.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:brand|generic|trade)\s*name:?\s*(.+)").unwrap(),
        Regex::new(r"(?i)(?:active|main)\s*ingredient:?\s*(.+)").unwrap(),
        Regex::new(r"(?i)(?:contains|composition):?\s*(.+)").unwrap(),
        Regex::new(r"(?m)^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*$").unwrap(),
        Regex::new(r"(?i)(?:medicine|drug|medication):?\s*(.+)").unwrap(),
    ]
});

/// Pick a candidate medicine name out of label text.
pub fn extract_medicine_name(text: &str, catalog: &Catalog) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(name) = captures.get(1) {
                let name = name.as_str().trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
    }

    // No labelled pattern: scan for a known catalog name in the text
    let lowered = text.to_lowercase();
    for key in catalog.names() {
        if lowered.contains(&key) {
            return Some(key);
        }
    }

    // Last resort: first non-empty line
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
