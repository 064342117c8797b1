use crate::board::note::{
    NewNote, Note, NoteId, NotePatch, DEFAULT_NOTE_COLOR, DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_WIDTH,
};
use crate::storage::NoteStore;
use anyhow::{bail, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random placement range for notes created without a position.
const PLACEMENT_RANGE: f64 = 500.0;

/// In-process store applying the same defaults as the REST service. Used for
/// offline mode and tests.
pub struct MemoryNoteStore {
    notes: Vec<Note>,
    next_id: NoteId,
    rng: StdRng,
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed for deterministic placement in tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    fn max_z_index(&self) -> i64 {
        self.notes.iter().map(|n| n.z_index).max().unwrap_or(0)
    }
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl NoteStore for MemoryNoteStore {
    fn list(&mut self) -> Result<Vec<Note>> {
        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| {
            a.z_index
                .cmp(&b.z_index)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(notes)
    }

    fn create(&mut self, new: &NewNote) -> Result<Note> {
        if new.content.is_empty() {
            bail!("content is required");
        }
        let now = timestamp();
        let note = Note {
            id: self.next_id,
            content: new.content.clone(),
            content_type: new.content_type.unwrap_or_default(),
            x: new
                .x
                .unwrap_or_else(|| self.rng.gen_range(0.0..PLACEMENT_RANGE)),
            y: new
                .y
                .unwrap_or_else(|| self.rng.gen_range(0.0..PLACEMENT_RANGE)),
            width: new.width.unwrap_or(DEFAULT_NOTE_WIDTH),
            height: new.height.unwrap_or(DEFAULT_NOTE_HEIGHT),
            z_index: new.z_index.unwrap_or_else(|| self.max_z_index() + 1),
            color: new
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_string()),
            created_at: now.clone(),
            updated_at: now,
            metadata: None,
        };
        self.next_id += 1;
        self.notes.push(note.clone());
        Ok(note)
    }

    fn update(&mut self, id: NoteId, patch: &NotePatch) -> Result<Option<Note>> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        patch.apply_to(note);
        note.updated_at = timestamp();
        Ok(Some(note.clone()))
    }

    fn delete(&mut self, id: NoteId) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        Ok(self.notes.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(content: &str) -> NewNote {
        NewNote {
            content: content.into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_applies_service_defaults() {
        let mut store = MemoryNoteStore::from_seed(7);
        let first = store.create(&new_note("a")).unwrap();
        let second = store.create(&new_note("b")).unwrap();
        assert_eq!((first.width, first.height), (250.0, 200.0));
        assert_eq!(first.color, DEFAULT_NOTE_COLOR);
        assert_eq!(first.z_index, 1);
        assert_eq!(second.z_index, 2);
        assert!((0.0..500.0).contains(&first.x));
        assert!((0.0..500.0).contains(&first.y));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn empty_content_is_rejected() {
        let mut store = MemoryNoteStore::new();
        assert!(store.create(&new_note("")).is_err());
    }

    #[test]
    fn update_and_delete_report_not_found() {
        let mut store = MemoryNoteStore::new();
        assert_eq!(store.update(99, &NotePatch::z_index(1)).unwrap(), None);
        assert!(!store.delete(99).unwrap());

        let note = store.create(&new_note("a")).unwrap();
        let updated = store.update(note.id, &NotePatch::position(5.0, 6.0)).unwrap().unwrap();
        assert_eq!((updated.x, updated.y), (5.0, 6.0));
        assert_eq!(updated.content, "a");
        assert!(store.delete(note.id).unwrap());
        assert!(store.get(note.id).is_none());
    }

    #[test]
    fn list_orders_by_z_index() {
        let mut store = MemoryNoteStore::new();
        let a = store.create(&new_note("a")).unwrap();
        let b = store.create(&new_note("b")).unwrap();
        store.update(b.id, &NotePatch::z_index(-1)).unwrap();
        let ids: Vec<_> = store.list().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }
}
