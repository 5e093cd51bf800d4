//! Placeholder substitution engine shared by the compiler and the installer
//!
//! Two constructs are supported over plain text:
//! - `{{name}}` is replaced with the answer value for `name`
//! - `{{#if name}}...{{/if}}` keeps the block body when `name` has a
//!   non-empty answer and drops it otherwise
//!
//! Answers are resolved once, up front, into an [`Answers`] set; no component
//! holds substitution state across invocations.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AgentpackError, Result, file_read_failed};

/// An ordered set of answer values driving substitution
///
/// Empty and whitespace-only values are filtered out at insertion time, so a
/// key either carries a usable value or is absent.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    values: BTreeMap<String, String>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair; empty values are dropped
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }

    /// Parse `key=value` pairs from the command line
    pub fn from_pairs(pairs: &[String]) -> Result<Self> {
        let mut answers = Self::new();
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| AgentpackError::InvalidAnswer {
                    input: pair.clone(),
                })?;
            answers.insert(key.trim(), value);
        }
        Ok(answers)
    }

    /// Load answers from a JSON or YAML file (flat string map)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| file_read_failed(path, &e))?;

        let parsed: BTreeMap<String, serde_json::Value> = if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            serde_json::from_str(&content).map_err(|e| AgentpackError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| AgentpackError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        };

        let mut answers = Self::new();
        for (key, value) in parsed {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => answers.insert(key, s),
                other => answers.insert(key, other.to_string()),
            }
        }
        Ok(answers)
    }
}

/// Replace every `{{name}}` occurrence with its answer value
pub fn substitute(text: &str, answers: &Answers) -> String {
    let mut result = text.to_string();
    for (key, value) in answers.iter() {
        let marker = format!("{{{{{key}}}}}");
        result = result.replace(&marker, value);
    }
    result
}

/// Apply conditional blocks, then placeholder substitution
pub fn apply(text: &str, answers: &Answers) -> String {
    substitute(&strip_conditionals(text, answers), answers)
}

/// Resolve `{{#if name}}...{{/if}}` blocks against the answer set
///
/// Innermost blocks are resolved first (rightmost open tag), so nesting
/// behaves as expected. An unterminated block is left verbatim.
fn strip_conditionals(text: &str, answers: &Answers) -> String {
    const OPEN: &str = "{{#if ";
    const CLOSE: &str = "{{/if}}";

    let mut result = text.to_string();
    loop {
        let Some(open_at) = result.rfind(OPEN) else {
            break;
        };
        let Some(tag_end) = result[open_at..].find("}}").map(|i| open_at + i + 2) else {
            break;
        };
        let Some(close_at) = result[tag_end..].find(CLOSE).map(|i| tag_end + i) else {
            break;
        };

        let name = result[open_at + OPEN.len()..tag_end - 2].trim().to_string();
        let body = result[tag_end..close_at].to_string();
        let replacement = if answers.get(&name).is_some() {
            body
        } else {
            String::new()
        };
        result.replace_range(open_at..close_at + CLOSE.len(), &replacement);
    }
    result
}
