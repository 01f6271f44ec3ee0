//! Value objects parsed from node API responses.

use serde::{Deserialize, Serialize};

/// Half-open span `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

/// Selection inside a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Range {
    /// Whole lines
    Lines { range: Span },
    /// Characters on a single line
    Chars { line: u64, range: Span },
}

/// A location in a commit's tree, on the old side, the new side or both.
///
/// `old` alone marks a deletion, `new` alone an addition. Both sides must be
/// present in the document; an absent side is written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLocation {
    pub commit: String,
    pub path: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub old: Option<Range>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub new: Option<Range>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}
