// src/template/substitute.rs

use std::collections::BTreeMap;

use serde_yaml::Value;

use super::PLACEHOLDER_RE;
use crate::config::SettingsMap;
use crate::errors::{CheckrunError, Result};

/// Replace every `{token}` in `template` with the matching setting.
///
/// Single pass: an inserted value that itself looks like `{other}` is
/// copied verbatim and never expanded again. Fails on the first token with
/// no entry in `settings`.
pub fn substitute(template: &str, settings: &SettingsMap) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = settings
            .get(name.as_str())
            .ok_or_else(|| CheckrunError::UnresolvedPlaceholder(name.as_str().to_string()))?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(&render_value(value));
        last = whole.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// Substitute both keys and values of a string mapping.
pub fn substitute_map(
    map: &BTreeMap<String, String>,
    settings: &SettingsMap,
) -> Result<BTreeMap<String, String>> {
    map.iter()
        .map(|(k, v)| Ok((substitute(k, settings)?, substitute(v, settings)?)))
        .collect()
}

/// Text form of a setting value as inserted into templates.
///
/// Strings are inserted as-is, numbers and booleans by their display form,
/// null as the empty string. Sequences and mappings fall back to compact
/// YAML.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Tagged(tagged) => render_value(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
