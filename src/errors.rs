// src/errors.rs

//! Crate-wide error types.
//!
//! `CheckrunError` covers everything that can go wrong while loading,
//! validating or executing checks. `TaskError` is the narrower, cloneable
//! error attached to a definition whose `task` block could not be resolved
//! into a concrete [`Task`](crate::config::Task) at load time.

use thiserror::Error;

/// Filesystem access goes through [`FileSystem`](crate::fs::FileSystem),
/// whose `anyhow` errors carry path context and land in `Other`.
#[derive(Error, Debug)]
pub enum CheckrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid regex: {0}")]
    RegexError(#[from] regex::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unresolved placeholder: {{{0}}}")]
    UnresolvedPlaceholder(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Problems with a definition's `task` block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("no `task` section in definition")]
    MissingTask,

    #[error("task has no `type` (or `task_type`) field")]
    MissingKind,

    #[error("unrecognized task type '{0}'")]
    UnknownKind(String),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CheckrunError>;
