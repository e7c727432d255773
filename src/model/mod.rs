// File: ./src/model/mod.rs
pub mod note;

pub use note::{Note, NoteFields, NoteId, NotePatch};
