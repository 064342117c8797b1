use crate::board::gesture::{GesturePreview, PointerTarget};
use crate::board::note::{Note, NoteId};
use crate::board::viewport::{Point, ViewportTransform};
use crate::editor::{display_spans, DisplaySpan};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;

/// Height of the note header (the drag handle), in board units.
pub const HEADER_HEIGHT: f64 = 28.0;
/// Side of the square resize handle in the bottom-right corner, in board units.
pub const RESIZE_HANDLE_SIZE: f64 = 16.0;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Everything a sink needs to draw one note.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedNote {
    pub id: NoteId,
    pub rect: ScreenRect,
    /// Screen pixels per board unit, for scaling chrome and text.
    pub scale: f64,
    pub z_index: i64,
    pub color: String,
    pub created_label: String,
    pub updated_label: String,
    pub spans: Vec<DisplaySpan>,
}

/// Project the cached notes into screen geometry, bottom-most first.
///
/// `preview` overrides the geometry of the note being dragged so live
/// feedback goes through the same projection as committed state.
pub fn project(
    viewport: &ViewportTransform,
    notes: &[Note],
    preview: Option<GesturePreview>,
) -> Vec<RenderedNote> {
    let mut ordered: Vec<&Note> = notes.iter().collect();
    ordered.sort_by(|a, b| stacking_order(a, b));

    ordered
        .into_iter()
        .map(|note| {
            let mut note = note.clone();
            if let Some(preview) = preview.filter(|p| p.id() == note.id) {
                preview.apply_to(&mut note);
            }
            let top_left = viewport.to_screen(Point::new(note.x, note.y));
            RenderedNote {
                id: note.id,
                rect: ScreenRect {
                    x: top_left.x,
                    y: top_left.y,
                    width: note.width * viewport.scale(),
                    height: note.height * viewport.scale(),
                },
                scale: viewport.scale(),
                z_index: note.z_index,
                created_label: local_date(&note.created_at),
                updated_label: format!("edited: {}", local_date_time(&note.updated_at)),
                spans: display_spans(&note.content),
                color: note.color,
            }
        })
        .collect()
}

/// `z_index` ascending; equal layers put the newer note first so the older
/// one paints over it, matching the service's listing order. Ids break the
/// remaining ties the same way.
fn stacking_order(a: &Note, b: &Note) -> Ordering {
    a.z_index
        .cmp(&b.z_index)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Resolve what lies under `pointer`, top-most note first.
pub fn hit_test(rendered: &[RenderedNote], pointer: Point) -> PointerTarget {
    for note in rendered.iter().rev() {
        if !note.rect.contains(pointer) {
            continue;
        }
        let handle = RESIZE_HANDLE_SIZE * note.scale;
        let right = note.rect.x + note.rect.width;
        let bottom = note.rect.y + note.rect.height;
        if pointer.x >= right - handle && pointer.y >= bottom - handle {
            return PointerTarget::ResizeHandle(note.id);
        }
        if pointer.y <= note.rect.y + HEADER_HEIGHT * note.scale {
            return PointerTarget::DragHandle(note.id);
        }
        return PointerTarget::NoteBody(note.id);
    }
    PointerTarget::Background
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerCommand {
    BringToFront,
    BringForward,
    SendBackward,
    SendToBack,
}

impl LayerCommand {
    pub const ALL: [LayerCommand; 4] = [
        LayerCommand::BringToFront,
        LayerCommand::BringForward,
        LayerCommand::SendBackward,
        LayerCommand::SendToBack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::BringToFront => "Bring to Front",
            Self::BringForward => "Bring Forward",
            Self::SendBackward => "Send Backward",
            Self::SendToBack => "Send to Back",
        }
    }
}

/// New `z_index` for `current` under `command`, relative to every cached note.
pub fn next_z_index(command: LayerCommand, current: i64, notes: &[Note]) -> i64 {
    let max = notes.iter().map(|n| n.z_index).max().unwrap_or(0);
    let min = notes.iter().map(|n| n.z_index).min().unwrap_or(0);
    match command {
        LayerCommand::BringToFront => max + 1,
        LayerCommand::SendToBack => min - 1,
        LayerCommand::BringForward => current + 1,
        LayerCommand::SendBackward => current - 1,
    }
}

fn parse_utc(stamp: &str) -> Option<DateTime<Local>> {
    let stamp = stamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
    Some(Utc.from_utc_datetime(&naive).with_timezone(&Local))
}

/// Viewer-local date for a service timestamp. Unparseable input is shown as-is.
pub fn local_date(stamp: &str) -> String {
    parse_utc(stamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| stamp.to_string())
}

pub fn local_date_time(stamp: &str) -> String {
    parse_utc(stamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| stamp.to_string())
}
