// File: ./src/client/mod.rs
pub mod core;
pub mod middleware;

use crate::error::ActionError;
use crate::model::{Note, NoteFields, NoteId, NotePatch};
use serde_json::Value;
use std::future::Future;

pub use crate::client::core::{NOTES_PATH, NotesClient, TRASH_PATH, note_path};

/// The notes resource as seen by the action layer. One method per request in the
/// HTTP contract; [`NotesClient`] is the production implementation.
pub trait NotesApi: Send + Sync {
    /// `GET /notes/`
    fn list_notes(&self) -> impl Future<Output = Result<Vec<Note>, ActionError>> + Send;

    /// `GET /notes/trash`
    fn list_trash(&self) -> impl Future<Output = Result<Vec<Note>, ActionError>> + Send;

    /// `POST /notes/`
    fn create_note(
        &self,
        fields: &NoteFields,
    ) -> impl Future<Output = Result<Note, ActionError>> + Send;

    /// `PATCH /notes/{id}`
    fn patch_note(
        &self,
        id: &NoteId,
        patch: &NotePatch,
    ) -> impl Future<Output = Result<Note, ActionError>> + Send;

    /// `DELETE /notes/{id}`
    fn delete_note(&self, id: &NoteId) -> impl Future<Output = Result<Value, ActionError>> + Send;

    /// `DELETE /notes/trash`
    fn clear_trash(&self) -> impl Future<Output = Result<Value, ActionError>> + Send;
}
