use std::fmt;
use std::str::FromStr;

/// Kind of task a check definition declares in `task.type`.
///
/// Matching is case-insensitive: `cmd`, `CMD` and `Cmd` are the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Run shell command(s).
    Cmd,
    /// Print operator notes (manual actions to perform).
    Notes,
    /// Make a GET/POST request.
    WebRequest,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cmd" => Ok(TaskKind::Cmd),
            "notes" => Ok(TaskKind::Notes),
            "web_request" => Ok(TaskKind::WebRequest),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskKind::Cmd => "cmd",
            TaskKind::Notes => "notes",
            TaskKind::WebRequest => "web_request",
        };
        f.write_str(s)
    }
}

/// HTTP method used by web requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Method actually used for a request.
    ///
    /// A non-empty body always means POST. With an empty body the hint
    /// decides, defaulting to GET.
    pub fn effective(hint: Option<HttpMethod>, body_is_empty: bool) -> HttpMethod {
        if !body_is_empty {
            HttpMethod::Post
        } else {
            hint.unwrap_or(HttpMethod::Get)
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(format!(
                "unsupported method {other} (expected \"GET\" or \"POST\")"
            )),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}
