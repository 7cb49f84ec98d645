//! Activity feed wire model

use serde::Deserialize;
use serde_json::Value;

/// One page of the private activity feed, newest entries first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub entries: Vec<RawEntry>,
    #[serde(default, rename = "paginationToken")]
    pub next_cursor: Option<String>,
}

impl FeedPage {
    /// Cursor for the following page, ignoring blank tokens.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor
            .as_deref()
            .map(str::trim)
            .filter(|cursor| !cursor.is_empty())
    }
}

/// A feed entry whose payload may reference zero, one or many games.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub time: String,
    /// Usually a JSON document encoded as a string.
    #[serde(default)]
    pub payload: Value,
}

impl RawEntry {
    pub fn new(time: impl Into<String>, payload: Value) -> Self {
        Self {
            time: time.into(),
            payload,
        }
    }
}
