// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The dispatcher talks to a `TaskBackend` instead of spawning processes
//! or opening connections itself. Production code uses [`RealBackend`];
//! tests can provide a backend that records what would have run.

use std::future::Future;
use std::pin::Pin;

use crate::config::{HttpTask, SettingsMap};
use crate::errors::Result;
use crate::report::Reporter;

use super::command::run_commands;
use super::http::{HttpClient, HttpResponse};
use super::{ExecOptions, ExecutionResult};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstracting how command and web-request tasks are executed.
///
/// Implementations own substitution of their inputs and must not fail:
/// every problem is reported through `reporter` and folded into the
/// returned result.
pub trait TaskBackend: Send + Sync {
    fn run_commands<'a>(
        &'a self,
        lines: &'a [String],
        settings: &'a SettingsMap,
        working_dir: Option<&'a str>,
        reporter: &'a dyn Reporter,
    ) -> BoxFuture<'a, ExecutionResult>;

    fn http_request<'a>(
        &'a self,
        task: &'a HttpTask,
        settings: &'a SettingsMap,
        reporter: &'a dyn Reporter,
    ) -> BoxFuture<'a, HttpResponse>;
}

/// Real backend used in production: `sh -c` processes and `reqwest`.
#[derive(Debug, Clone)]
pub struct RealBackend {
    options: ExecOptions,
    http: HttpClient,
}

impl RealBackend {
    pub fn new(options: ExecOptions) -> Result<Self> {
        Ok(Self {
            options,
            http: HttpClient::new(options.timeout)?,
        })
    }
}

impl TaskBackend for RealBackend {
    fn run_commands<'a>(
        &'a self,
        lines: &'a [String],
        settings: &'a SettingsMap,
        working_dir: Option<&'a str>,
        reporter: &'a dyn Reporter,
    ) -> BoxFuture<'a, ExecutionResult> {
        Box::pin(run_commands(lines, settings, working_dir, &self.options, reporter))
    }

    fn http_request<'a>(
        &'a self,
        task: &'a HttpTask,
        settings: &'a SettingsMap,
        reporter: &'a dyn Reporter,
    ) -> BoxFuture<'a, HttpResponse> {
        Box::pin(self.http.request(
            &task.url,
            settings,
            &task.body,
            &task.headers,
            task.method_hint,
            reporter,
        ))
    }
}
