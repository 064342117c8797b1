use crate::board::gesture::{GestureCommit, GestureController, GesturePreview, PointerTarget};
use crate::board::note::{NewNote, Note, NoteId, NotePatch, PRESET_COLORS};
use crate::board::render::{self, LayerCommand, RenderedNote};
use crate::board::viewport::{Point, ViewportTransform, BUTTON_ZOOM_STEP};
use crate::editor::{self, EditorKey, EditorShortcut, EditorSubmission, NoteEditor};
use crate::storage::NoteStore;
use anyhow::{anyhow, Result};

/// Offset from the viewport centre to the top-left of a newly created note.
pub const NEW_NOTE_OFFSET: Point = Point::new(125.0, 75.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Blank content; nothing was sent and the editor stays open.
    Rejected,
    Created(NoteId),
    Updated(NoteId),
}

/// Owns the note cache and every piece of interaction state.
///
/// All cache mutation goes through this type, one event at a time. A cached
/// note is only replaced by the response to a request this session sent,
/// and only after that request succeeded.
pub struct BoardSession<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    viewport: ViewportTransform,
    viewport_size: Point,
    gestures: GestureController,
    preview: Option<GesturePreview>,
    pub editor: NoteEditor,
    selected_color: String,
}

impl<S: NoteStore> BoardSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            notes: Vec::new(),
            viewport: ViewportTransform::default(),
            viewport_size: Point::default(),
            gestures: GestureController::default(),
            preview: None,
            editor: NoteEditor::default(),
            selected_color: PRESET_COLORS[0].to_string(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Where the board sits on screen and how large it is.
    pub fn set_viewport_rect(&mut self, origin: Point, size: Point) {
        self.viewport.origin = origin;
        self.viewport_size = size;
    }

    pub fn selected_color(&self) -> &str {
        &self.selected_color
    }

    pub fn select_color(&mut self, color: impl Into<String>) {
        self.selected_color = color.into();
    }

    /// Replace the cache with the service's listing.
    pub fn refresh(&mut self) -> Result<()> {
        let notes = self.store.list()?;
        tracing::info!("loaded {} notes", notes.len());
        self.notes = notes;
        Ok(())
    }

    pub fn render(&self) -> Vec<RenderedNote> {
        render::project(&self.viewport, &self.notes, self.preview)
    }

    pub fn hit_test(&self, pointer: Point) -> PointerTarget {
        render::hit_test(&self.render(), pointer)
    }

    /// Note a double-click at `pointer` should open. Only the body counts;
    /// the header and resize grip belong to gestures.
    pub fn double_click_target(&self, pointer: Point) -> Option<NoteId> {
        match self.hit_test(pointer) {
            PointerTarget::NoteBody(id) => Some(id),
            _ => None,
        }
    }

    /// Start whichever gesture the pointer landed on. Returns the target so
    /// the caller can react to body hits (double-click, context menu).
    pub fn pointer_down(&mut self, pointer: Point) -> PointerTarget {
        let target = self.hit_test(pointer);
        let note = match target {
            PointerTarget::DragHandle(id) | PointerTarget::ResizeHandle(id) => {
                self.notes.iter().find(|n| n.id == id)
            }
            _ => None,
        };
        if self.gestures.pointer_down(target, pointer, note, &self.viewport) {
            tracing::debug!("gesture started: {:?}", self.gestures.state());
        }
        target
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if let Some(preview) = self.gestures.pointer_move(pointer, &mut self.viewport) {
            self.preview = Some(preview);
        }
    }

    /// Finish the active gesture, committing a move or resize to storage.
    ///
    /// On failure the live preview is dropped and the cache is left as it
    /// was, so the note snaps back to its last stored geometry.
    pub fn pointer_up(&mut self, pointer: Point) -> Result<()> {
        self.preview = None;
        let Some(commit) = self.gestures.pointer_up(pointer, &self.viewport) else {
            return Ok(());
        };
        let patch = match commit {
            GestureCommit::Move { x, y, .. } => NotePatch::position(x, y),
            GestureCommit::Resize { width, height, .. } => NotePatch::size(width, height),
        };
        tracing::debug!("committing {:?}", commit);
        self.commit_patch(commit.id(), &patch)
    }

    fn commit_patch(&mut self, id: NoteId, patch: &NotePatch) -> Result<()> {
        let result = self.store.update(id, patch);
        match result {
            Ok(Some(stored)) => {
                self.replace_cached(stored);
                Ok(())
            }
            Ok(None) => {
                tracing::warn!("note {id} not found while committing update");
                Err(anyhow!("note {id} no longer exists"))
            }
            Err(e) => {
                tracing::warn!("failed to update note {id}: {e:#}");
                Err(e)
            }
        }
    }

    fn replace_cached(&mut self, stored: Note) {
        if let Some(slot) = self.notes.iter_mut().find(|n| n.id == stored.id) {
            *slot = stored;
        } else {
            self.notes.push(stored);
        }
    }

    /// Wheel zoom about the pointer (absolute screen position).
    pub fn wheel(&mut self, delta_y: f64, pointer: Point) {
        let pivot = pointer - self.viewport.origin;
        self.viewport.zoom_wheel(delta_y, pivot);
    }

    pub fn zoom_in(&mut self) {
        let center = self.viewport_center_local();
        self.viewport.zoom(BUTTON_ZOOM_STEP, center);
    }

    pub fn zoom_out(&mut self) {
        let center = self.viewport_center_local();
        self.viewport.zoom(-BUTTON_ZOOM_STEP, center);
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    fn viewport_center_local(&self) -> Point {
        Point::new(self.viewport_size.x / 2.0, self.viewport_size.y / 2.0)
    }

    pub fn open_new_note(&mut self) {
        self.editor.open_new();
    }

    pub fn open_note(&mut self, id: NoteId) -> bool {
        let Some(content) = self.note(id).map(|n| n.content.clone()) else {
            return false;
        };
        self.editor.open_existing(id, &content);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editor.close();
    }

    /// Commit the editor. Storage failures leave the editor open with its
    /// content so the user can retry.
    pub fn save_edit(&mut self) -> Result<SaveOutcome> {
        let Some(submission) = self.editor.submission() else {
            tracing::debug!("ignoring save of blank note");
            return Ok(SaveOutcome::Rejected);
        };
        let outcome = match submission {
            EditorSubmission::Update { id, content } => {
                self.commit_patch(id, &NotePatch::content(content))?;
                SaveOutcome::Updated(id)
            }
            EditorSubmission::Create { content } => {
                let center = self.viewport.center_canvas(self.viewport_size);
                let created = self.store.create(&NewNote {
                    content,
                    color: Some(self.selected_color.clone()),
                    x: Some(center.x - NEW_NOTE_OFFSET.x),
                    y: Some(center.y - NEW_NOTE_OFFSET.y),
                    ..Default::default()
                })?;
                let id = created.id;
                tracing::info!("created note {id}");
                self.notes.push(created);
                SaveOutcome::Created(id)
            }
        };
        self.editor.close();
        Ok(outcome)
    }

    /// Apply an editor shortcut. `Ok(None)` when the key means nothing.
    pub fn editor_key(&mut self, key: EditorKey, command: bool) -> Result<Option<SaveOutcome>> {
        if !self.editor.is_open() {
            return Ok(None);
        }
        match editor::shortcut_for(key, command) {
            Some(EditorShortcut::Cancel) => {
                self.cancel_edit();
                Ok(None)
            }
            Some(EditorShortcut::Save) => self.save_edit().map(Some),
            None => Ok(None),
        }
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<()> {
        if !self.store.delete(id)? {
            tracing::warn!("note {id} not found while deleting");
            return Err(anyhow!("note {id} no longer exists"));
        }
        tracing::info!("deleted note {id}");
        self.notes.retain(|n| n.id != id);
        self.editor.close_if_editing(id);
        Ok(())
    }

    pub fn apply_layer(&mut self, id: NoteId, command: LayerCommand) -> Result<()> {
        let Some(current) = self.note(id).map(|n| n.z_index) else {
            return Err(anyhow!("note {id} is not on the board"));
        };
        let z_index = render::next_z_index(command, current, &self.notes);
        self.commit_patch(id, &NotePatch::z_index(z_index))
    }

    /// Note content as HTML, for copying out of the board.
    pub fn note_html(&self, id: NoteId) -> Option<String> {
        self.note(id).map(|n| editor::to_html(&n.content))
    }
}
