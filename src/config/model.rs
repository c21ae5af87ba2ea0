// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_yaml::Value;

use crate::errors::TaskError;
use crate::template::render_value;
use crate::types::{HttpMethod, TaskKind};

/// A check definition as read from a YAML file.
///
/// ```yaml
/// summary: Check the SSH banner
/// description: Grabs the banner of the target's SSH service
/// task:
///   type: cmd
///   cmds:
///     - "nc -w 3 {target} 22"
///   notes: "Compare the banner against {expected_banner}"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCheckDefinition {
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub task: Option<RawTask>,
}

/// The `task:` block, with every alias the format accepts.
///
/// Where two spellings are both present, the first one listed wins:
/// `task_type` over `type`, `cmd` over `cmds`, `dir` over `cmd_dir`,
/// `notes` over `note`, `data` over `body`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTask {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub task_type: Option<String>,

    #[serde(default)]
    pub cmd: Option<OneOrMany>,

    #[serde(default)]
    pub cmds: Option<OneOrMany>,

    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default)]
    pub cmd_dir: Option<String>,

    #[serde(default)]
    pub notes: Option<OneOrMany>,

    #[serde(default)]
    pub note: Option<OneOrMany>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub headers: BTreeMap<String, Value>,

    #[serde(default)]
    pub data: Option<BTreeMap<String, Value>>,

    #[serde(default)]
    pub body: Option<BTreeMap<String, Value>>,

    /// Regex searched (case-insensitively) in the task output.
    ///
    /// Placeholders are scanned from the raw file text, so a counted
    /// repetition such as `[0-9]{3}` also reads as a required setting `3`.
    /// Write it as `[0-9][0-9][0-9]` or supply the key.
    #[serde(default)]
    pub expect: Option<String>,
}

/// A field that may be written as a single string or a list of strings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Run shell command(s), optionally from a given directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTask {
    pub command_lines: Vec<String>,
    pub working_dir: Option<String>,
}

/// A single GET/POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTask {
    pub url: String,
    pub method_hint: Option<HttpMethod>,
    pub headers: BTreeMap<String, String>,
    pub body: BTreeMap<String, String>,
}

impl HttpTask {
    pub fn method(&self) -> HttpMethod {
        HttpMethod::effective(self.method_hint, self.body.is_empty())
    }
}

/// Manual actions shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesTask {
    pub notes: Vec<String>,
}

/// The one thing a check definition does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Command(CommandTask),
    HttpRequest(HttpTask),
    Notes(NotesTask),
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::Command(_) => TaskKind::Cmd,
            Task::HttpRequest(_) => TaskKind::WebRequest,
            Task::Notes(_) => TaskKind::Notes,
        }
    }
}

/// A loaded check definition.
///
/// `task` is resolved once at load time. A definition whose task block is
/// malformed or of an unknown type is still kept (so it shows up in load
/// order), carrying the reason it cannot run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDefinition {
    pub id: String,
    pub path: PathBuf,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub task: Result<Task, TaskError>,
    /// Notes attached to a non-`notes` task, emitted after it runs. Kept
    /// when `task` is an error too.
    pub notes: Vec<String>,
    pub expect: Option<String>,
}

impl CheckDefinition {
    pub fn from_raw(path: impl AsRef<Path>, raw: RawCheckDefinition) -> Self {
        let path = path.as_ref().to_path_buf();
        let (task, notes, expect) = match raw.task {
            Some(raw_task) => {
                let expect = raw_task.expect.clone();
                let attached = raw_task.attached_notes();
                match raw_task.resolve() {
                    Ok((task, notes)) => (Ok(task), notes, expect),
                    Err(e) => (Err(e), attached, expect),
                }
            }
            None => (Err(TaskError::MissingTask), Vec::new(), None),
        };

        Self {
            id: path.display().to_string(),
            path,
            summary: raw.summary,
            description: raw.description,
            task,
            notes,
            expect,
        }
    }

    /// File stem used to name this definition's output file.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "check".to_string())
    }
}

impl RawTask {
    /// `notes`/`note` as written, whatever the task kind.
    pub fn attached_notes(&self) -> Vec<String> {
        self.notes
            .clone()
            .or_else(|| self.note.clone())
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
    }

    /// Turn the raw block into a typed task plus side-channel notes.
    pub fn resolve(self) -> Result<(Task, Vec<String>), TaskError> {
        let kind_str = self
            .task_type
            .or(self.kind)
            .ok_or(TaskError::MissingKind)?;
        let kind = TaskKind::from_str(&kind_str).map_err(TaskError::UnknownKind)?;

        let notes = self
            .notes
            .or(self.note)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();

        let task = match kind {
            TaskKind::Notes => return Ok((Task::Notes(NotesTask { notes }), Vec::new())),
            TaskKind::Cmd => Task::Command(CommandTask {
                command_lines: self
                    .cmd
                    .or(self.cmds)
                    .map(OneOrMany::into_vec)
                    .unwrap_or_default(),
                working_dir: self.dir.or(self.cmd_dir),
            }),
            TaskKind::WebRequest => {
                let url = self.url.ok_or_else(|| TaskError::InvalidField {
                    field: "url".to_string(),
                    reason: "web_request tasks need a url".to_string(),
                })?;
                let method_hint = self
                    .method
                    .as_deref()
                    .map(HttpMethod::from_str)
                    .transpose()
                    .map_err(|reason| TaskError::InvalidField {
                        field: "method".to_string(),
                        reason,
                    })?;
                Task::HttpRequest(HttpTask {
                    url,
                    method_hint,
                    headers: stringify_map(self.headers),
                    body: stringify_map(self.data.or(self.body).unwrap_or_default()),
                })
            }
        };

        Ok((task, notes))
    }
}

fn stringify_map(map: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    map.into_iter()
        .map(|(k, v)| {
            let v = render_value(&v);
            (k, v)
        })
        .collect()
}
