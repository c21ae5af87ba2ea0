// src/logging.rs

//! Logging setup for `checkrun` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `CHECKRUN_LOG`, any `EnvFilter` directive ("debug", "checkrun=trace,reqwest=warn")
//! 3. `info`
//!
//! Logs are sent to STDERR; persisted check output goes to the outfolder.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "CHECKRUN_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Initialise global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directive = filter_directive(cli_level, std::env::var(LOG_ENV_VAR).ok());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

/// Pick the filter directive for this run.
///
/// An unparsable `CHECKRUN_LOG` is ignored rather than fatal.
pub fn filter_directive(cli_level: Option<LogLevel>, env: Option<String>) -> String {
    if let Some(level) = cli_level {
        return level.as_directive().to_string();
    }
    env.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && EnvFilter::try_new(s).is_ok())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
