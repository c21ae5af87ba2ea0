// src/exec/mod.rs

//! Task execution layer.
//!
//! - [`command`] runs shell command lines through `tokio::process::Command`.
//! - [`http`] makes single GET/POST requests with `reqwest`.
//! - [`notes`] substitutes and surfaces operator notes.
//! - [`backend`] provides the `TaskBackend` trait the dispatcher talks to,
//!   and the `RealBackend` used in production. Tests can swap in a fake.
//! - [`dispatch`] picks the executor for a definition's task and handles
//!   the notes side-channel.

use std::time::Duration;

pub mod backend;
pub mod command;
pub mod dispatch;
pub mod http;
pub mod notes;

pub use backend::{BoxFuture, RealBackend, TaskBackend};
pub use command::run_commands;
pub use dispatch::{Dispatched, dispatch};
pub use http::{DEFAULT_USER_AGENT, HttpClient, HttpResponse};
pub use notes::emit_notes;

/// Uniform outcome of any task, whatever its kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub success: bool,
    /// Captured command output, response body, emitted notes, or the
    /// error message when the task could not run.
    pub output: String,
    /// HTTP status for web requests, exit status for commands.
    pub status_code: Option<i32>,
}

impl ExecutionResult {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            status_code: None,
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
            status_code: None,
        }
    }

    pub fn with_status(mut self, code: i32) -> Self {
        self.status_code = Some(code);
        self
    }
}

/// Knobs shared by the command and HTTP executors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    /// Upper bound for a single command invocation or request.
    pub timeout: Option<Duration>,
    /// Non-zero exit status marks the command as failed.
    pub strict_exit: bool,
}
