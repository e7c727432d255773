// File: ./src/signal.rs
// Typed messages dispatched to the application-state store.
use crate::model::Note;
use serde_json::Value;
use strum::IntoStaticStr;

#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    LoadingNotes,
    FetchNotes(Vec<Note>),
    FetchTrash(Vec<Note>),
    CreateNote(Note),
    DeleteNote(Note),
    UpdateNote(Note),
    // The backend's deletion confirmation has no fixed shape; keep it raw.
    HardDeleteNote(Value),
    HardWipeNote(Value),
    RestoreNote(Note),
    ClearTrash,
    ClearDeletedNote,
}

impl Signal {
    /// Wire name of the signal, e.g. `"LOADING_NOTES"`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Sink for signals. The store implements this; tests record into it.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, signal: Signal);
}
