// src/exec/dispatch.rs

use crate::config::{CheckDefinition, NotesTask, SettingsMap, Task};
use crate::report::Reporter;

use super::backend::TaskBackend;
use super::notes::emit_notes;
use super::ExecutionResult;

/// Outcome of dispatching one definition against one settings set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dispatched {
    pub result: ExecutionResult,
    /// Notes surfaced while handling the definition, after substitution.
    pub notes: Vec<String>,
}

/// Run a definition's task and then its side-channel notes.
///
/// Never fails: a task that could not be resolved at load time, or whose
/// executor reports a problem, produces a failed `ExecutionResult`. Attached
/// notes are emitted once the task step has been attempted, whatever its
/// outcome, including an unresolvable task.
pub async fn dispatch(
    def: &CheckDefinition,
    settings: &SettingsMap,
    backend: &dyn TaskBackend,
    reporter: &dyn Reporter,
) -> Dispatched {
    let (result, mut notes) = match &def.task {
        Ok(Task::Command(cmd)) => {
            let result = backend
                .run_commands(&cmd.command_lines, settings, cmd.working_dir.as_deref(), reporter)
                .await;
            (result, Vec::new())
        }
        Ok(Task::HttpRequest(req)) => {
            let result = backend.http_request(req, settings, reporter).await.into();
            (result, Vec::new())
        }
        Ok(Task::Notes(task)) => run_notes_task(task, settings, reporter),
        Err(e) => {
            let msg = format!("Error executing task from {}: {e}", def.id);
            reporter.error(&msg);
            (ExecutionResult::failed(msg), Vec::new())
        }
    };

    if !def.notes.is_empty() {
        match emit_notes(&def.notes, settings, reporter) {
            Ok(emitted) => notes.extend(emitted),
            Err(e) => reporter.error(&format!("Error emitting notes from {}: {e}", def.id)),
        }
    }

    Dispatched { result, notes }
}

fn run_notes_task(
    task: &NotesTask,
    settings: &SettingsMap,
    reporter: &dyn Reporter,
) -> (ExecutionResult, Vec<String>) {
    if task.notes.is_empty() {
        reporter.error("No notes provided");
        return (ExecutionResult::failed("no notes provided"), Vec::new());
    }

    match emit_notes(&task.notes, settings, reporter) {
        Ok(emitted) => (ExecutionResult::succeeded(emitted.join("\n")), emitted),
        Err(e) => {
            let msg = format!("Error emitting notes: {e}");
            reporter.error(&msg);
            (ExecutionResult::failed(msg), Vec::new())
        }
    }
}
