#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use checkrun::config::{
    CheckDefinition, CommandTask, HttpTask, NotesTask, SettingsMap, SettingsSet, Task,
};
use checkrun::errors::TaskError;
use checkrun::types::HttpMethod;
use serde_yaml::Value;

/// Builder for `CheckDefinition` to simplify test setup.
pub struct CheckBuilder {
    path: PathBuf,
    summary: Option<String>,
    description: Option<String>,
    task: Result<Task, TaskError>,
    notes: Vec<String>,
    expect: Option<String>,
}

impl CheckBuilder {
    fn with_task(path: &str, task: Result<Task, TaskError>) -> Self {
        Self {
            path: PathBuf::from(path),
            summary: None,
            description: None,
            task,
            notes: Vec::new(),
            expect: None,
        }
    }

    pub fn cmd(path: &str, lines: &[&str]) -> Self {
        Self::with_task(
            path,
            Ok(Task::Command(CommandTask {
                command_lines: lines.iter().map(|s| s.to_string()).collect(),
                working_dir: None,
            })),
        )
    }

    pub fn notes(path: &str, notes: &[&str]) -> Self {
        Self::with_task(
            path,
            Ok(Task::Notes(NotesTask {
                notes: notes.iter().map(|s| s.to_string()).collect(),
            })),
        )
    }

    pub fn web(path: &str, url: &str) -> Self {
        Self::with_task(
            path,
            Ok(Task::HttpRequest(HttpTask {
                url: url.to_string(),
                method_hint: None,
                headers: BTreeMap::new(),
                body: BTreeMap::new(),
            })),
        )
    }

    pub fn invalid(path: &str, err: TaskError) -> Self {
        Self::with_task(path, Err(err))
    }

    pub fn working_dir(mut self, dir: &str) -> Self {
        if let Ok(Task::Command(ref mut cmd)) = self.task {
            cmd.working_dir = Some(dir.to_string());
        }
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        if let Ok(Task::HttpRequest(ref mut req)) = self.task {
            req.headers.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn data(mut self, key: &str, value: &str) -> Self {
        if let Ok(Task::HttpRequest(ref mut req)) = self.task {
            req.body.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        if let Ok(Task::HttpRequest(ref mut req)) = self.task {
            req.method_hint = Some(method);
        }
        self
    }

    /// Side-channel notes emitted after the task.
    pub fn with_notes(mut self, notes: &[&str]) -> Self {
        self.notes = notes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn expect(mut self, pattern: &str) -> Self {
        self.expect = Some(pattern.to_string());
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn build(self) -> CheckDefinition {
        CheckDefinition {
            id: self.path.display().to_string(),
            path: self.path,
            summary: self.summary,
            description: self.description,
            task: self.task,
            notes: self.notes,
            expect: self.expect,
        }
    }
}

/// Builder for settings mappings.
#[derive(Default)]
pub struct SettingsBuilder {
    values: SettingsMap,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> SettingsMap {
        self.values
    }

    pub fn build_set(self, source: &str) -> SettingsSet {
        SettingsSet::new(source, self.values)
    }
}
