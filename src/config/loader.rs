// src/config/loader.rs

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::config::model::{CheckDefinition, RawCheckDefinition};
use crate::errors::{CheckrunError, Result};
use crate::fs::FileSystem;
use crate::template::extract_placeholders;

/// A source that could not be loaded, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub source: String,
    pub reason: String,
}

impl LoadFailure {
    pub fn new(source: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self {
            source: source.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

/// Everything read from the check-definition sources of one run.
#[derive(Debug, Clone, Default)]
pub struct LoadedChecks {
    /// Successfully parsed definitions, in load order.
    pub definitions: Vec<CheckDefinition>,
    /// Union of placeholder names used by the parsed definitions.
    pub required: BTreeSet<String>,
    pub failures: Vec<LoadFailure>,
}

/// Build the case-insensitive regex used to select definition files.
pub fn path_filter(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Parse one definition source.
///
/// Only a document that is not a YAML mapping (or is empty) fails here; a
/// bad `task` block is carried inside the returned definition instead.
pub fn parse_definition(path: &Path, raw: &str) -> Result<CheckDefinition> {
    if raw.trim().is_empty() {
        return Err(CheckrunError::ConfigError("empty check definition".to_string()));
    }
    let doc: serde_yaml::Value = serde_yaml::from_str(raw)?;
    if !doc.is_mapping() {
        return Err(CheckrunError::ConfigError(
            "check definition must be a YAML mapping".to_string(),
        ));
    }
    let parsed: RawCheckDefinition = serde_yaml::from_value(doc)?;
    Ok(CheckDefinition::from_raw(path, parsed))
}

/// Expand the `--checks-files` entries into the definition files to load.
///
/// Files are taken as given, directories are walked recursively with
/// entries sorted by path. Every candidate must match `filter`. A file
/// reached more than once keeps only its first position. Entries that are
/// neither a file nor a directory are reported as failures.
pub fn discover_check_files(
    fs: &dyn FileSystem,
    entries: &[PathBuf],
    filter: &Regex,
) -> (Vec<PathBuf>, Vec<LoadFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for entry in entries {
        if fs.is_file(entry) {
            files.push(entry.clone());
        } else if fs.is_dir(entry) {
            if let Err(e) = walk_dir(fs, entry, &mut files) {
                failures.push(LoadFailure::new(entry, e.to_string()));
            }
        } else {
            failures.push(LoadFailure::new(entry, "unknown check file path type"));
        }
    }

    let mut seen = BTreeSet::new();
    files.retain(|p| filter.is_match(&p.to_string_lossy()) && seen.insert(p.clone()));
    (files, failures)
}

fn walk_dir(fs: &dyn FileSystem, dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let mut entries = fs.read_dir(dir)?;
    entries.sort();
    for entry in entries {
        if fs.is_dir(&entry) {
            walk_dir(fs, &entry, out)?;
        } else if fs.is_file(&entry) {
            out.push(entry);
        }
    }
    Ok(())
}

/// Read, scan and parse every selected definition file.
///
/// Placeholders are scanned from the raw text, but only counted when the
/// file also parses: a file that fails to parse contributes nothing to the
/// run.
pub fn load_check_definitions(
    fs: &dyn FileSystem,
    entries: &[PathBuf],
    filter: &Regex,
) -> LoadedChecks {
    let (files, mut failures) = discover_check_files(fs, entries, filter);
    let mut loaded = LoadedChecks::default();

    for path in files {
        debug!(path = %path.display(), "parsing check file for inputs and YAML config");
        let raw = match fs.read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                failures.push(LoadFailure::new(&path, format!("{e:#}")));
                continue;
            }
        };

        match parse_definition(&path, &raw) {
            Ok(def) => {
                loaded.required.extend(extract_placeholders(&raw));
                loaded.definitions.push(def);
            }
            Err(e) => failures.push(LoadFailure::new(&path, e.to_string())),
        }
    }

    loaded.failures = failures;
    loaded
}
