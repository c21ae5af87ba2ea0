// src/template/placeholders.rs

use std::collections::BTreeSet;

use super::PLACEHOLDER_RE;

/// Collect the distinct placeholder names found anywhere in `raw`.
///
/// This runs over the literal source text, before any YAML parsing, so
/// tokens inside keys, values and comments are all reported.
pub fn extract_placeholders(raw: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
