// src/exec/notes.rs

use crate::config::SettingsMap;
use crate::errors::Result;
use crate::report::Reporter;
use crate::template::substitute;

/// Substitute each note and surface it to the operator.
///
/// Notes are reported at warning severity since they describe manual
/// actions. Stops at the first note that can't be substituted; notes
/// before it have already been reported.
pub fn emit_notes(
    notes: &[String],
    settings: &SettingsMap,
    reporter: &dyn Reporter,
) -> Result<Vec<String>> {
    let mut emitted = Vec::with_capacity(notes.len());
    for note in notes {
        let note = substitute(note, settings)?;
        reporter.warning(&note);
        emitted.push(note);
    }
    Ok(emitted)
}
