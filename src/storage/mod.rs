//! Note storage collaborator.
//!
//! Not-found is reported in-band (`Ok(None)` / `Ok(false)`); `Err` means the
//! request itself failed.

pub mod http;
pub mod memory;

pub use http::HttpNoteStore;
pub use memory::MemoryNoteStore;

use crate::board::note::{NewNote, Note, NoteId, NotePatch};
use anyhow::Result;

pub trait NoteStore {
    fn list(&mut self) -> Result<Vec<Note>>;

    fn create(&mut self, note: &NewNote) -> Result<Note>;

    /// Returns the stored note after the update, or `None` if `id` is unknown.
    fn update(&mut self, id: NoteId, patch: &NotePatch) -> Result<Option<Note>>;

    /// Returns `false` if `id` is unknown.
    fn delete(&mut self, id: NoteId) -> Result<bool>;
}

impl<S: NoteStore + ?Sized> NoteStore for Box<S> {
    fn list(&mut self) -> Result<Vec<Note>> {
        (**self).list()
    }

    fn create(&mut self, note: &NewNote) -> Result<Note> {
        (**self).create(note)
    }

    fn update(&mut self, id: NoteId, patch: &NotePatch) -> Result<Option<Note>> {
        (**self).update(id, patch)
    }

    fn delete(&mut self, id: NoteId) -> Result<bool> {
        (**self).delete(id)
    }
}
