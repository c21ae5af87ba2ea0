// src/engine/orchestrator.rs

use std::path::Path;

use regex::RegexBuilder;
use tracing::info;

use crate::config::{
    CheckDefinition, SettingsSet, load_check_definitions, load_settings_sets, path_filter,
    validate_inputs,
};
use crate::errors::Result;
use crate::exec::{Dispatched, TaskBackend, dispatch};
use crate::fs::FileSystem;
use crate::report::Reporter;
use crate::types::TaskKind;

use super::output::{output_path, prepare_outfolder, write_lines};
use super::{
    CheckOutcome, NotesEmission, PreparedRun, RunOptions, RunPhase, RunSummary, SkippedSet,
};

/// Position of one (settings set, definition) pair in the run.
#[derive(Debug, Clone, Copy)]
struct OutputSlot {
    set_index: usize,
    check_index: usize,
}

/// Drives a whole run: load, validate, then execute every definition
/// against every eligible settings set.
///
/// Everything is awaited in sequence: one settings set at a time, one
/// definition at a time, in load order. Per-source and per-task problems
/// are reported and the run carries on; only setup failures (a bad path
/// filter, an outfolder that can't be created) are returned as errors.
pub struct Orchestrator<'a> {
    fs: &'a dyn FileSystem,
    backend: &'a dyn TaskBackend,
    reporter: &'a dyn Reporter,
    phase: RunPhase,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        backend: &'a dyn TaskBackend,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            fs,
            backend,
            reporter,
            phase: RunPhase::Loading,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Full run: prepare, reset the outfolder, execute.
    pub async fn run(&mut self, options: &RunOptions) -> Result<RunSummary> {
        let prepared = self.prepare(options)?;
        if let Some(dir) = &options.outfolder {
            prepare_outfolder(self.fs, dir)?;
        }
        Ok(self.execute(prepared, options.outfolder.as_deref()).await)
    }

    /// `Loading` and `Validating` phases.
    pub fn prepare(&mut self, options: &RunOptions) -> Result<PreparedRun> {
        self.phase = RunPhase::Loading;
        let filter = path_filter(&options.path_filter)?;

        let checks = load_check_definitions(self.fs, &options.checks, &filter);
        for failure in &checks.failures {
            self.reporter.error(&format!(
                "Error parsing file: {}. Error: {}",
                failure.source, failure.reason
            ));
        }
        if checks.definitions.is_empty() {
            self.reporter.error("No check definitions loaded");
        }

        let (sets, settings_failures) =
            load_settings_sets(self.fs, &options.settings, &options.targets);
        for failure in &settings_failures {
            self.reporter.error(&format!(
                "Error parsing settings file: {}. Error: {}",
                failure.source, failure.reason
            ));
        }

        self.phase = RunPhase::Validating;
        let mut eligible = Vec::new();
        let mut skipped = Vec::new();
        for set in sets {
            let validation = validate_inputs(&checks.required, &set.values);
            if validation.is_ok() {
                eligible.push(set);
                continue;
            }
            for token in &validation.missing {
                self.reporter.error(&format!(
                    "input: {token} not supplied in settings {}",
                    set.source
                ));
            }
            skipped.push(SkippedSet {
                source: set.source,
                missing: validation.missing,
            });
        }

        Ok(PreparedRun {
            checks,
            eligible,
            skipped,
            settings_failures,
        })
    }

    /// `Executing` phase, ending in `Done`.
    pub async fn execute(&mut self, prepared: PreparedRun, outfolder: Option<&Path>) -> RunSummary {
        self.phase = RunPhase::Executing;

        let mut summary = RunSummary {
            definitions_loaded: prepared.checks.definitions.len(),
            load_failures: prepared.checks.failures,
            skipped: prepared.skipped,
            ..RunSummary::default()
        };
        summary.load_failures.extend(prepared.settings_failures);

        if !prepared.checks.definitions.is_empty() {
            for (set_index, set) in prepared.eligible.iter().enumerate() {
                self.reporter
                    .info(&format!("Executing checks with settings: {}", set.source));
                for (index, def) in prepared.checks.definitions.iter().enumerate() {
                    let slot = OutputSlot { set_index, check_index: index };
                    self.execute_one(set, slot, def, outfolder, &mut summary).await;
                }
                summary.executed_sets.push(set.source.clone());
            }
        }

        info!(
            executed_sets = summary.executed_sets.len(),
            skipped_sets = summary.skipped.len(),
            outcomes = summary.outcomes.len(),
            "run finished"
        );
        self.phase = RunPhase::Done;
        summary
    }

    async fn execute_one(
        &self,
        set: &SettingsSet,
        slot: OutputSlot,
        def: &CheckDefinition,
        outfolder: Option<&Path>,
        summary: &mut RunSummary,
    ) {
        self.reporter
            .debug(&format!("Executing conf from file: {}...", def.id));
        if let Some(s) = &def.summary {
            self.reporter.debug(&format!("Summary: {s}"));
        }
        if let Some(d) = &def.description {
            self.reporter.debug(&format!("Description: {d}"));
        }

        let Dispatched { result, notes } =
            dispatch(def, &set.values, self.backend, self.reporter).await;

        if let Ok(task) = &def.task {
            if task.kind() != TaskKind::Notes {
                self.reporter
                    .info(&format!("Output of {}:\n{}", task.kind(), result.output));
            }
        }

        let matched = def
            .expect
            .as_deref()
            .and_then(|pattern| self.check_expectation(pattern, &result.output));

        if let Some(dir) = outfolder {
            let path = output_path(dir, slot.set_index, &set.source, slot.check_index, def);
            let lines: Vec<&str> = result.output.lines().collect();
            if let Err(e) = write_lines(self.fs, &path, &lines) {
                self.reporter.error(&format!(
                    "Error writing output to {}: {e:#}",
                    path.display()
                ));
            }
        }

        if !notes.is_empty() {
            summary.notes.push(NotesEmission {
                settings: set.source.clone(),
                check: def.id.clone(),
                notes,
            });
        }
        summary.outcomes.push(CheckOutcome {
            settings: set.source.clone(),
            check: def.id.clone(),
            result,
            matched,
        });
    }

    /// Case-insensitive search of `pattern` in `output`.
    fn check_expectation(&self, pattern: &str, output: &str) -> Option<bool> {
        let re = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => re,
            Err(e) => {
                self.reporter
                    .error(&format!("Invalid expect regex {pattern}: {e}"));
                return None;
            }
        };

        let matched = re.is_match(output);
        if matched {
            self.reporter.info(&format!("Output matched: {pattern}"));
        } else {
            self.reporter.warning(&format!("Output did not match: {pattern}"));
        }
        Some(matched)
    }
}
