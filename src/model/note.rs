// File: ./src/model/note.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the backend. Some deployments hand out integers,
/// others strings, so both are accepted and echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Num(i64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Num(n) => write!(f, "{}", n),
            NoteId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NoteId {
    fn from(n: i64) -> Self {
        NoteId::Num(n)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        // Numeric-looking input (CLI args, route segments) maps back to the numeric form
        // so equality with server payloads holds.
        match s.parse::<i64>() {
            Ok(n) => NoteId::Num(n),
            Err(_) => NoteId::Text(s.to_string()),
        }
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        NoteId::from(s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// Editable fields, as submitted by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
}

impl NoteFields {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Partial update body for `PATCH /notes/{id}`. Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl NotePatch {
    pub fn deleted(deleted: bool) -> Self {
        Self {
            deleted: Some(deleted),
            ..Self::default()
        }
    }

    pub fn liked(liked: bool) -> Self {
        Self {
            liked: Some(liked),
            ..Self::default()
        }
    }
}

impl From<NoteFields> for NotePatch {
    fn from(fields: NoteFields) -> Self {
        Self {
            title: Some(fields.title),
            content: Some(fields.content),
            ..Self::default()
        }
    }
}
