pub mod content;

pub use content::{
    deserialize, display_spans, escape_html, image_urls, normalize, serialize, to_html, DisplaySpan,
    Segment,
};

use crate::board::note::NoteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Escape,
    Enter,
    Other,
}

/// The two editor shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorShortcut {
    Cancel,
    Save,
}

/// Map a key press while the editor is open. `command` is Ctrl or Cmd.
pub fn shortcut_for(key: EditorKey, command: bool) -> Option<EditorShortcut> {
    match (key, command) {
        (EditorKey::Escape, _) => Some(EditorShortcut::Cancel),
        (EditorKey::Enter, true) => Some(EditorShortcut::Save),
        _ => None,
    }
}

/// What a save attempt should do with storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSubmission {
    Create { content: String },
    Update { id: NoteId, content: String },
}

/// Modal composer state. `editing_id == None` means a new note.
#[derive(Debug, Clone, Default)]
pub struct NoteEditor {
    open: bool,
    editing_id: Option<NoteId>,
    pub segments: Vec<Segment>,
}

impl NoteEditor {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing_id(&self) -> Option<NoteId> {
        self.editing_id
    }

    pub fn title(&self) -> &'static str {
        if self.editing_id.is_some() {
            "EDIT_NOTE"
        } else {
            "NEW_NOTE"
        }
    }

    /// Delete is only offered for notes that already exist.
    pub fn can_delete(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn open_new(&mut self) {
        self.open = true;
        self.editing_id = None;
        self.segments = vec![Segment::Text(String::new())];
    }

    pub fn open_existing(&mut self, id: NoteId, content: &str) {
        self.open = true;
        self.editing_id = Some(id);
        self.segments = deserialize(content);
        if !matches!(self.segments.last(), Some(Segment::Text(_))) {
            self.segments.push(Segment::Text(String::new()));
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing_id = None;
        self.segments.clear();
    }

    /// Close if the editor refers to a note that no longer exists.
    pub fn close_if_editing(&mut self, id: NoteId) {
        if self.editing_id == Some(id) {
            self.close();
        }
    }

    /// Append a pasted image plus an empty text run to keep typing after it.
    pub fn insert_image(&mut self, data_url: String) {
        if matches!(self.segments.last(), Some(Segment::Text(t)) if t.is_empty()) {
            self.segments.pop();
        }
        self.segments.push(Segment::Image(data_url));
        self.segments.push(Segment::Text(String::new()));
    }

    pub fn remove_segment(&mut self, index: usize) {
        if index < self.segments.len() {
            self.segments.remove(index);
        }
        self.segments = normalize(&self.segments);
        if !matches!(self.segments.last(), Some(Segment::Text(_))) {
            self.segments.push(Segment::Text(String::new()));
        }
    }

    /// Serialized, trimmed content.
    pub fn content(&self) -> String {
        serialize(&self.segments).trim().to_string()
    }

    /// Build the storage request, or `None` when the content is blank.
    pub fn submission(&self) -> Option<EditorSubmission> {
        if !self.open {
            return None;
        }
        let content = self.content();
        if content.is_empty() {
            return None;
        }
        Some(match self.editing_id {
            Some(id) => EditorSubmission::Update { id, content },
            None => EditorSubmission::Create { content },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_yields_no_submission() {
        let mut editor = NoteEditor::default();
        editor.open_new();
        editor.segments = vec![Segment::Text("  \n\t ".into())];
        assert_eq!(editor.submission(), None);
        assert!(editor.is_open());
    }

    #[test]
    fn existing_note_round_trips_into_update() {
        let mut editor = NoteEditor::default();
        let stored = "see [IMG:data:image/png;base64,AAAA]";
        editor.open_existing(4, stored);
        assert_eq!(editor.title(), "EDIT_NOTE");
        assert!(editor.can_delete());
        assert_eq!(
            editor.submission(),
            Some(EditorSubmission::Update {
                id: 4,
                content: stored.into()
            })
        );
    }

    #[test]
    fn pasted_image_is_followed_by_text() {
        let mut editor = NoteEditor::default();
        editor.open_new();
        editor.insert_image("data:image/png;base64,AAAA".into());
        assert_eq!(
            editor.segments,
            vec![
                Segment::Image("data:image/png;base64,AAAA".into()),
                Segment::Text(String::new())
            ]
        );
        editor.remove_segment(0);
        assert_eq!(editor.segments, vec![Segment::Text(String::new())]);
    }

    #[test]
    fn shortcuts() {
        assert_eq!(shortcut_for(EditorKey::Escape, false), Some(EditorShortcut::Cancel));
        assert_eq!(shortcut_for(EditorKey::Enter, true), Some(EditorShortcut::Save));
        assert_eq!(shortcut_for(EditorKey::Enter, false), None);
        assert_eq!(shortcut_for(EditorKey::Other, true), None);
    }
}
