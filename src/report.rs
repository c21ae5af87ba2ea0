// src/report.rs

//! Operator-facing message sink.
//!
//! The engine reports progress and results through [`Reporter`] rather
//! than calling `tracing` directly, so tests can capture exactly what an
//! operator would have seen.

use std::fmt;

use tracing::{debug, error, info, warn};

/// Severity of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    /// Warnings and operator notes.
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// Line-oriented sink with four severities.
pub trait Reporter: Send + Sync {
    fn report(&self, severity: Severity, message: &str);

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }

    fn warning(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn debug(&self, message: &str) {
        self.report(Severity::Debug, message);
    }
}

/// Reporter that forwards every message to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => error!("{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Info => info!("{message}"),
            Severity::Debug => debug!("{message}"),
        }
    }
}
