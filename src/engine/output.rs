// src/engine/output.rs

//! Persisting check output to the outfolder.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::config::CheckDefinition;
use crate::fs::FileSystem;

/// Start from an empty outfolder: remove it if present, then create it.
pub fn prepare_outfolder(fs: &dyn FileSystem, dir: &Path) -> Result<()> {
    if fs.is_dir(dir) {
        debug!(dir = %dir.display(), "removing existing outfolder");
        fs.remove_dir_all(dir)?;
    }
    debug!(dir = %dir.display(), "creating outfolder");
    fs.create_dir_all(dir)
}

/// Write `lines` to `path`, one per line, trailing whitespace trimmed.
pub fn write_lines<S: AsRef<str>>(fs: &dyn FileSystem, path: &Path, lines: &[S]) -> Result<()> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref().trim_end());
        contents.push('\n');
    }
    fs.write(path, contents.as_bytes())
}

/// Output file for the `check_index`-th definition run against the
/// `set_index`-th settings set.
///
/// `<outfolder>/<NNN>_<settings-slug>/<NNN>_<definition-stem>.txt`. The set
/// number keeps sources that slug alike (`a/b.yml`, `a_b.yml`) apart.
pub fn output_path(
    outfolder: &Path,
    set_index: usize,
    settings_source: &str,
    check_index: usize,
    def: &CheckDefinition,
) -> PathBuf {
    outfolder
        .join(format!("{:03}_{}", set_index + 1, slug(settings_source)))
        .join(format!("{:03}_{}.txt", check_index + 1, slug(&def.stem())))
}

/// Make `s` safe as a single path component.
pub fn slug(s: &str) -> String {
    let slug: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match slug.trim_matches('.') {
        "" => "_".to_string(),
        _ => slug,
    }
}
