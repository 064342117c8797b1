use crate::board::note::{Note, NoteId, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH};
use crate::board::viewport::{Point, ViewportTransform};

/// What the pointer went down on, as resolved by hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    Background,
    DragHandle(NoteId),
    ResizeHandle(NoteId),
    NoteBody(NoteId),
}

/// The single active drag. At most one variant can be live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Panning {
        /// Pointer position minus pan at gesture start.
        anchor: Point,
    },
    MovingNote {
        id: NoteId,
        pointer_start: Point,
        note_start: Point,
    },
    ResizingNote {
        id: NoteId,
        pointer_start: Point,
        width_start: f64,
        height_start: f64,
    },
}

/// Live, uncommitted geometry for the note being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePreview {
    Position { id: NoteId, x: f64, y: f64 },
    Size { id: NoteId, width: f64, height: f64 },
}

impl GesturePreview {
    pub fn id(&self) -> NoteId {
        match *self {
            Self::Position { id, .. } | Self::Size { id, .. } => id,
        }
    }

    pub fn apply_to(&self, note: &mut Note) {
        match *self {
            Self::Position { x, y, .. } => {
                note.x = x;
                note.y = y;
            }
            Self::Size { width, height, .. } => {
                note.width = width;
                note.height = height;
            }
        }
    }
}

/// Result of releasing the pointer. Panning commits nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommit {
    Move { id: NoteId, x: f64, y: f64 },
    Resize { id: NoteId, width: f64, height: f64 },
}

impl GestureCommit {
    pub fn id(&self) -> NoteId {
        match *self {
            Self::Move { id, .. } | Self::Resize { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    /// Id of the note currently being moved or resized.
    pub fn active_note(&self) -> Option<NoteId> {
        match self.state {
            GestureState::MovingNote { id, .. } | GestureState::ResizingNote { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Start a gesture for `target`. `note` must be the cached note the
    /// target refers to; body hits and a missing note start nothing.
    /// Returns `false` if a gesture is already active.
    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        pointer: Point,
        note: Option<&Note>,
        viewport: &ViewportTransform,
    ) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = match (target, note) {
            (PointerTarget::Background, _) => GestureState::Panning {
                anchor: pointer - viewport.pan,
            },
            (PointerTarget::DragHandle(id), Some(note)) if note.id == id => {
                GestureState::MovingNote {
                    id,
                    pointer_start: pointer,
                    note_start: Point::new(note.x, note.y),
                }
            }
            (PointerTarget::ResizeHandle(id), Some(note)) if note.id == id => {
                GestureState::ResizingNote {
                    id,
                    pointer_start: pointer,
                    width_start: note.width,
                    height_start: note.height,
                }
            }
            _ => GestureState::Idle,
        };
        !self.is_idle()
    }

    /// Track the pointer. Panning writes the viewport directly; note gestures
    /// return the live geometry to draw.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        viewport: &mut ViewportTransform,
    ) -> Option<GesturePreview> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Panning { anchor } => {
                viewport.pan = pointer - anchor;
                None
            }
            GestureState::MovingNote { .. } | GestureState::ResizingNote { .. } => {
                self.preview(pointer, viewport.scale())
            }
        }
    }

    /// Release the pointer. Always ends the active gesture.
    pub fn pointer_up(&mut self, pointer: Point, viewport: &ViewportTransform) -> Option<GestureCommit> {
        let commit = self.preview(pointer, viewport.scale()).map(|preview| match preview {
            GesturePreview::Position { id, x, y } => GestureCommit::Move { id, x, y },
            GesturePreview::Size { id, width, height } => GestureCommit::Resize { id, width, height },
        });
        self.state = GestureState::Idle;
        commit
    }

    fn preview(&self, pointer: Point, scale: f64) -> Option<GesturePreview> {
        match self.state {
            GestureState::MovingNote {
                id,
                pointer_start,
                note_start,
            } => {
                let (dx, dy) = board_delta(pointer_start, pointer, scale);
                Some(GesturePreview::Position {
                    id,
                    x: note_start.x + dx,
                    y: note_start.y + dy,
                })
            }
            GestureState::ResizingNote {
                id,
                pointer_start,
                width_start,
                height_start,
            } => {
                let (dx, dy) = board_delta(pointer_start, pointer, scale);
                Some(GesturePreview::Size {
                    id,
                    width: (width_start + dx).max(MIN_NOTE_WIDTH),
                    height: (height_start + dy).max(MIN_NOTE_HEIGHT),
                })
            }
            _ => None,
        }
    }
}

fn board_delta(start: Point, now: Point, scale: f64) -> (f64, f64) {
    ((now.x - start.x) / scale, (now.y - start.y) / scale)
}
