// src/config/validate.rs

use std::collections::BTreeSet;

use crate::config::settings::SettingsMap;

/// Result of checking a settings set against the required placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputValidation {
    /// Required placeholders with no key in the settings, sorted.
    pub missing: Vec<String>,
}

impl InputValidation {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check that every required placeholder has a value in `settings`.
///
/// Pure function of the two key sets; values are not inspected.
pub fn validate_inputs(required: &BTreeSet<String>, settings: &SettingsMap) -> InputValidation {
    let missing = required
        .iter()
        .filter(|token| !settings.contains_key(token.as_str()))
        .cloned()
        .collect();
    InputValidation { missing }
}
