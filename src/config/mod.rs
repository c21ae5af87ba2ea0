// src/config/mod.rs

//! Loading of check definitions and settings.
//!
//! Responsibilities:
//! - Define the YAML-backed data model (`model.rs`).
//! - Discover and load definition files (`loader.rs`).
//! - Load settings sets and fan them out over targets (`settings.rs`).
//! - Check settings against required placeholders (`validate.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{
    LoadFailure, LoadedChecks, discover_check_files, load_check_definitions, parse_definition,
    path_filter,
};
pub use model::{
    CheckDefinition, CommandTask, HttpTask, NotesTask, OneOrMany, RawCheckDefinition, RawTask,
    Task,
};
pub use settings::{SettingsMap, SettingsSet, TARGET_KEY, load_settings_sets, parse_settings};
pub use validate::{InputValidation, validate_inputs};
