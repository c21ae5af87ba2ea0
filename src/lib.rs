// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod report;
pub mod template;
pub mod types;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::engine::{Orchestrator, PreparedRun, RunSummary};
use crate::exec::RealBackend;
use crate::fs::RealFileSystem;
use crate::report::TracingReporter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the real filesystem, executor backend and reporter
/// - the orchestrator, which loads, validates and executes the checks
///
/// Returns `Ok(None)` for `--dry-run`.
pub async fn run(args: CliArgs) -> Result<Option<RunSummary>> {
    let options = args.run_options();
    let fs = RealFileSystem;
    let reporter = TracingReporter;
    let backend = RealBackend::new(options.exec_options()).context("building HTTP client")?;

    let mut orchestrator = Orchestrator::new(&fs, &backend, &reporter);

    if args.dry_run {
        let prepared = orchestrator.prepare(&options)?;
        print_dry_run(&prepared);
        return Ok(None);
    }

    let summary = orchestrator.run(&options).await?;
    Ok(Some(summary))
}

/// Simple dry-run output: print checks, required inputs and settings sets.
fn print_dry_run(prepared: &PreparedRun) {
    println!("checkrun dry-run");
    println!();

    println!("checks ({}):", prepared.checks.definitions.len());
    for def in &prepared.checks.definitions {
        println!("  - {}", def.id);
        if let Some(ref summary) = def.summary {
            println!("      summary: {summary}");
        }
        match &def.task {
            Ok(task) => println!("      type: {}", task.kind()),
            Err(e) => println!("      error: {e}"),
        }
        if !def.notes.is_empty() {
            println!("      notes: {}", def.notes.len());
        }
    }
    println!();

    println!("required inputs: {:?}", prepared.checks.required);
    println!();

    println!("settings sets:");
    for set in &prepared.eligible {
        println!("  - {} (ok)", set.source);
    }
    for skipped in &prepared.skipped {
        println!("  - {} (missing: {:?})", skipped.source, skipped.missing);
    }

    debug!("dry-run complete (no execution)");
}
