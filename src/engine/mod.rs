// src/engine/mod.rs

//! Run orchestration.
//!
//! A run moves through `Loading → Validating → Executing → Done`:
//! definitions and settings are loaded, every settings set is checked for
//! the placeholders the definitions need, and each eligible set has every
//! definition dispatched against it, strictly in order.
//!
//! The state machine lives in [`orchestrator`]; output persistence in
//! [`output`].

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{LoadFailure, LoadedChecks, SettingsSet};
use crate::exec::{ExecOptions, ExecutionResult};

pub mod orchestrator;
pub mod output;

pub use orchestrator::Orchestrator;

/// Everything a run needs to know, already resolved from the CLI.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Definition files or directories, in load order.
    pub checks: Vec<PathBuf>,
    /// Settings files; each is an independent settings set.
    pub settings: Vec<PathBuf>,
    /// Case-insensitive regex a definition path must match.
    pub path_filter: String,
    /// Where per-check output is persisted. `None` disables persistence.
    pub outfolder: Option<PathBuf>,
    pub targets: Vec<String>,
    pub timeout: Option<Duration>,
    pub strict_exit: bool,
}

impl RunOptions {
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            timeout: self.timeout,
            strict_exit: self.strict_exit,
        }
    }
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Loading,
    Validating,
    Executing,
    Done,
}

/// A settings set that failed validation and was not executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSet {
    pub source: String,
    pub missing: Vec<String>,
}

/// Output of the `Loading` and `Validating` phases.
#[derive(Debug, Clone, Default)]
pub struct PreparedRun {
    pub checks: LoadedChecks,
    /// Settings sets that passed validation, in load order.
    pub eligible: Vec<SettingsSet>,
    pub skipped: Vec<SkippedSet>,
    /// Settings sources that could not be loaded.
    pub settings_failures: Vec<LoadFailure>,
}

/// Result of one definition against one settings set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub settings: String,
    pub check: String,
    pub result: ExecutionResult,
    /// Whether the output matched the task's `expect` regex, if it has one.
    pub matched: Option<bool>,
}

/// Notes surfaced by one definition against one settings set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesEmission {
    pub settings: String,
    pub check: String,
    pub notes: Vec<String>,
}

/// Everything that happened during a run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub definitions_loaded: usize,
    pub load_failures: Vec<LoadFailure>,
    pub skipped: Vec<SkippedSet>,
    /// Sources of the settings sets that were executed.
    pub executed_sets: Vec<String>,
    pub outcomes: Vec<CheckOutcome>,
    pub notes: Vec<NotesEmission>,
}

impl RunSummary {
    /// True when at least one definition loaded and at least one settings
    /// set was validated and executed.
    pub fn is_success(&self) -> bool {
        self.definitions_loaded > 0 && !self.executed_sets.is_empty()
    }

    pub fn failed_outcomes(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.result.success)
    }
}
