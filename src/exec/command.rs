// src/exec/command.rs

//! Shell command runner.

use std::path::Path;
use std::process::{Output, Stdio};

use anyhow::{Context, Result, anyhow};
use tokio::process::Command;
use tracing::debug;

use crate::config::SettingsMap;
use crate::exec::{ExecOptions, ExecutionResult};
use crate::report::Reporter;
use crate::template::substitute;

/// Separator used to join command lines into one shell script.
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";
#[cfg(windows)]
const LINE_SEPARATOR: &str = " & ";

/// Run `lines` as one shell invocation and capture its combined output.
///
/// Lines share one shell, so `cd` and exported variables carry over. The
/// joined script is substituted once against `settings`. A `working_dir`
/// that does not exist is reported and the script runs from the current
/// directory instead. The directory is handed to the child process only;
/// this process's current directory never changes.
///
/// Launch failures, timeouts and substitution errors are reported and
/// returned as a failed result; they never propagate.
pub async fn run_commands(
    lines: &[String],
    settings: &SettingsMap,
    working_dir: Option<&str>,
    options: &ExecOptions,
    reporter: &dyn Reporter,
) -> ExecutionResult {
    if lines.is_empty() {
        reporter.error("No cmds provided");
        return ExecutionResult::failed("no commands provided");
    }

    let script = lines.join(LINE_SEPARATOR);
    let script = match substitute(&script, settings) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("Error executing command: {script}. Error: {e}");
            reporter.error(&msg);
            return ExecutionResult::failed(msg);
        }
    };

    let dir = working_dir.and_then(|d| resolve_working_dir(d, settings, reporter));

    reporter.debug(&format!("Executing command: {script}..."));
    let output = match spawn_and_wait(&script, dir.as_deref(), options).await {
        Ok(out) => out,
        Err(e) => {
            reporter.error(&format!("Error executing command: {script}. Error: {e:#}"));
            return ExecutionResult::failed("");
        }
    };

    let text = combined_output(&output);
    let code = output.status.code().unwrap_or(-1);
    debug!(exit_code = code, success = output.status.success(), "command exited");

    if output.status.success() {
        return ExecutionResult::succeeded(text).with_status(code);
    }

    if options.strict_exit {
        reporter.error(&format!("Command exited with status {code}: {script}"));
        ExecutionResult::failed(text).with_status(code)
    } else {
        reporter.debug(&format!("Command exited with status {code}"));
        ExecutionResult::succeeded(text).with_status(code)
    }
}

fn resolve_working_dir(
    dir: &str,
    settings: &SettingsMap,
    reporter: &dyn Reporter,
) -> Option<String> {
    let dir = match substitute(dir, settings) {
        Ok(d) => d,
        Err(e) => {
            reporter.error(&format!(
                "Cannot resolve working directory {dir}: {e}; running in current directory"
            ));
            return None;
        }
    };

    if Path::new(&dir).is_dir() {
        Some(dir)
    } else {
        reporter.error(&format!(
            "Working directory {dir} does not exist; running in current directory"
        ));
        None
    }
}

async fn spawn_and_wait(script: &str, dir: Option<&str>, options: &ExecOptions) -> Result<Output> {
    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(script);
        c
    } else {
        // Fold stderr into stdout inside the shell so both streams keep
        // their relative order.
        let mut c = Command::new("sh");
        c.arg("-c").arg(format!("exec 2>&1\n{script}"));
        c
    };

    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let run = cmd.output();
    match options.timeout {
        Some(limit) => tokio::time::timeout(limit, run)
            .await
            .map_err(|_| anyhow!("timed out after {}s", limit.as_secs_f64()))?
            .context("running shell"),
        None => run.await.context("running shell"),
    }
}

fn combined_output(output: &Output) -> String {
    let mut bytes = output.stdout.clone();
    bytes.extend_from_slice(&output.stderr);
    String::from_utf8_lossy(&bytes).trim_end().to_string()
}
