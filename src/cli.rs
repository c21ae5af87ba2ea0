// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::engine::RunOptions;

/// Command-line arguments for `checkrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "checkrun",
    version,
    about = "Parse checks files and execute their tasks against one or more settings files.",
    long_about = None
)]
pub struct CliArgs {
    /// YAML files containing checks to perform.
    ///
    /// Multiple files or directories may be given, separated by ','.
    /// Directories are walked recursively.
    #[arg(short = 'c', long = "checks-files", value_name = "LIST")]
    pub checks_files: String,

    /// YAML settings file(s) holding the values substituted into checks.
    ///
    /// Multiple files may be given, separated by ','. Each file is an
    /// independent settings set.
    #[arg(short = 'i', long = "input-file", value_name = "LIST")]
    pub input_file: String,

    /// Regex a checks file path must match to be parsed and executed.
    #[arg(short = 'r', long, value_name = "REGEX", default_value = ".*")]
    pub regex: String,

    /// Output folder. Removed and recreated on every run.
    #[arg(short = 'o', long, value_name = "DIR", default_value = "outfolder")]
    pub outfolder: String,

    /// List of targets (comma-separated), exposed to checks as `{target}`.
    #[arg(short = 't', long, value_name = "LIST", default_value = "")]
    pub targets: String,

    /// Timeout in seconds applied to each command and web request.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Treat a non-zero command exit status as a failed check.
    #[arg(long)]
    pub strict_exit: bool,

    /// Parse + validate and list the checks, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHECKRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// Resolve the parsed flags into the options the engine runs with.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            checks: split_list(&self.checks_files)
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            settings: split_list(&self.input_file)
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            path_filter: self.regex.clone(),
            outfolder: Some(PathBuf::from(&self.outfolder)),
            targets: split_list(&self.targets),
            timeout: self.timeout.map(Duration::from_secs),
            strict_exit: self.strict_exit,
        }
    }
}

/// Split a comma-separated CLI list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
