use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Identifier assigned by the book service.
///
/// The service is free to use numeric or textual ids; whichever form arrives
/// is sent back unchanged. Numbers outside the `i64` range and non-integers
/// are kept as JSON numbers rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(Number),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Number(id) => write!(f, "{id}"),
            BookId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for BookId {
    fn from(value: i64) -> Self {
        BookId::Number(value.into())
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        BookId::Text(value.to_string())
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        BookId::Text(value)
    }
}

impl BookId {
    /// Matches ids typed by a user, where `7` and `"7"` name the same record.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            BookId::Number(id) => raw.trim().parse::<Number>().is_ok_and(|parsed| parsed == *id),
            BookId::Text(id) => id == raw.trim(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub page_count: i64,
    pub description: String,
    pub read: bool,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
