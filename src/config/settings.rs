// src/config/settings.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::config::loader::LoadFailure;
use crate::errors::{CheckrunError, Result};
use crate::fs::FileSystem;
use crate::template::render_value;

/// Setting key → value, as substituted into `{key}` placeholders.
pub type SettingsMap = BTreeMap<String, Value>;

/// Key under which each entry of `--targets` is exposed.
pub const TARGET_KEY: &str = "target";

/// One named set of settings a run executes every check against.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSet {
    /// Where the values came from: a file path, optionally `#<target>`.
    pub source: String,
    pub values: SettingsMap,
}

impl SettingsSet {
    pub fn new(source: impl Into<String>, values: SettingsMap) -> Self {
        Self {
            source: source.into(),
            values,
        }
    }

    /// Copy of this set with `target` added.
    ///
    /// A `target` key already present in the source wins over the one
    /// supplied here.
    pub fn with_target(&self, target: &str) -> Self {
        let mut values = SettingsMap::new();
        values.insert(TARGET_KEY.to_string(), Value::String(target.to_string()));
        values.extend(self.values.clone());
        Self {
            source: format!("{}#{}", self.source, target),
            values,
        }
    }
}

/// Parse one settings document.
///
/// The document must be a mapping (or empty). Scalar keys such as numbers
/// are accepted and keyed by their text form.
pub fn parse_settings(raw: &str) -> Result<SettingsMap> {
    let doc: Value = serde_yaml::from_str(raw)?;
    let mapping = match doc {
        Value::Null => return Ok(SettingsMap::new()),
        Value::Mapping(m) => m,
        other => {
            return Err(CheckrunError::ConfigError(format!(
                "settings must be a mapping of keys to values, got {}",
                describe(&other)
            )));
        }
    };

    let mut settings = SettingsMap::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s,
            k @ (Value::Number(_) | Value::Bool(_)) => render_value(&k),
            other => {
                return Err(CheckrunError::ConfigError(format!(
                    "settings keys must be scalars, got {}",
                    describe(&other)
                )));
            }
        };
        settings.insert(key, value);
    }
    Ok(settings)
}

/// Load every settings source, then fan out over `targets`.
///
/// Without targets, each readable source is one set. With targets, each
/// source yields one set per target, in `source × target` order. Sources
/// that can't be read or parsed are returned as failures.
pub fn load_settings_sets(
    fs: &dyn FileSystem,
    paths: &[PathBuf],
    targets: &[String],
) -> (Vec<SettingsSet>, Vec<LoadFailure>) {
    let mut sets = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        match load_settings_file(fs, path) {
            Ok(set) if targets.is_empty() => sets.push(set),
            Ok(set) => sets.extend(targets.iter().map(|t| set.with_target(t))),
            Err(e) => failures.push(LoadFailure::new(path, e.to_string())),
        }
    }

    (sets, failures)
}

fn load_settings_file(fs: &dyn FileSystem, path: &Path) -> Result<SettingsSet> {
    debug!(path = %path.display(), "parsing settings file");
    let raw = fs.read_to_string(path)?;
    let values = parse_settings(&raw)?;
    Ok(SettingsSet::new(path.display().to_string(), values))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
