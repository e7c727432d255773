// File: src/store.rs
use crate::model::{Note, NoteId};
use crate::signal::{Dispatch, Signal};
use serde_json::Value;
use std::sync::Mutex;

/// The notes slice of application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePad {
    pub notes: Vec<Note>,
    pub trash: Vec<Note>,
    pub deleted_note: Option<Note>,
    pub loading: bool,
}

impl NotePad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, signal: &Signal) {
        match signal {
            Signal::LoadingNotes => self.loading = true,
            Signal::FetchNotes(list) => {
                self.notes = list.clone();
                self.loading = false;
            }
            Signal::FetchTrash(list) => {
                self.trash = list.clone();
                self.loading = false;
            }
            Signal::CreateNote(note) => {
                self.notes.push(note.clone());
                self.loading = false;
            }
            Signal::DeleteNote(note) => {
                remove(&mut self.notes, &note.id);
                upsert(&mut self.trash, note.clone());
                self.deleted_note = Some(note.clone());
                self.loading = false;
            }
            Signal::UpdateNote(note) => {
                if !replace(&mut self.notes, note) && !replace(&mut self.trash, note) {
                    log::debug!("UPDATE_NOTE for unknown note {}", note.id);
                }
                self.loading = false;
            }
            Signal::HardDeleteNote(payload) | Signal::HardWipeNote(payload) => {
                if let Some(id) = payload_id(payload) {
                    let from_trash = remove(&mut self.trash, &id);
                    let from_notes = remove(&mut self.notes, &id);
                    let removed = from_trash.or(from_notes);
                    if removed.is_some() {
                        self.deleted_note = removed;
                    }
                }
                self.loading = false;
            }
            Signal::RestoreNote(note) => {
                remove(&mut self.trash, &note.id);
                upsert(&mut self.notes, note.clone());
                self.loading = false;
            }
            Signal::ClearTrash => self.trash.clear(),
            Signal::ClearDeletedNote => self.deleted_note = None,
        }
    }

    pub fn get_note(&self, id: &NoteId) -> Option<&Note> {
        self.notes
            .iter()
            .chain(self.trash.iter())
            .find(|n| &n.id == id)
    }
}

fn payload_id(payload: &Value) -> Option<NoteId> {
    payload
        .get("id")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn remove(list: &mut Vec<Note>, id: &NoteId) -> Option<Note> {
    let idx = list.iter().position(|n| &n.id == id)?;
    Some(list.remove(idx))
}

fn replace(list: &mut [Note], note: &Note) -> bool {
    match list.iter_mut().find(|n| n.id == note.id) {
        Some(slot) => {
            *slot = note.clone();
            true
        }
        None => false,
    }
}

fn upsert(list: &mut Vec<Note>, note: Note) {
    if !replace(list, &note) {
        list.push(note);
    }
}

/// Serialized single-writer store: every dispatch reduces under one lock.
#[derive(Debug, Default)]
pub struct NoteStore {
    state: Mutex<NotePad>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> NotePad {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Dispatch for NoteStore {
    fn dispatch(&self, signal: Signal) {
        log::debug!("dispatch {}", signal.kind());
        match self.state.lock() {
            Ok(mut state) => state.reduce(&signal),
            Err(poisoned) => poisoned.into_inner().reduce(&signal),
        }
    }
}
