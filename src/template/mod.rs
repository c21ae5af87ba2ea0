// src/template/mod.rs

//! `{token}` placeholders in check definitions.
//!
//! - [`placeholders`] finds the token names a definition source needs.
//! - [`substitute`] replaces tokens with values from a settings mapping.
//!
//! Both share one token grammar: `{` + `[A-Za-z0-9_-]+` + `}`. Anything
//! else between braces (spaces, dots, format specs) is left untouched.

use std::sync::LazyLock;

use regex::Regex;

pub mod placeholders;
pub mod substitute;

pub use placeholders::extract_placeholders;
pub use substitute::{render_value, substitute, substitute_map};

/// Regex matching a single placeholder; capture group 1 is the token name.
pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_-]+)\}").expect("placeholder regex is valid")
});
