use super::textures::TextureCache;
use super::theme;
use crate::board::gesture::{GestureState, PointerTarget};
use crate::board::note::NoteId;
use crate::board::render::{RenderedNote, HEADER_HEIGHT, RESIZE_HANDLE_SIZE};
use crate::board::session::BoardSession;
use crate::board::viewport::Point;
use crate::editor::DisplaySpan;
use crate::storage::NoteStore;
use eframe::egui::{self, Color32, Pos2, Rect, Stroke};

const BODY_FONT_SIZE: f32 = 14.0;
const CHROME_FONT_SIZE: f32 = 10.0;
const BODY_PADDING: f32 = 8.0;
const FOOTER_HEIGHT: f32 = 16.0;

/// What happened on the board this frame that the app has to react to.
#[derive(Default)]
pub struct CanvasOutput {
    pub open_note: Option<NoteId>,
    pub context_menu: Option<(NoteId, Pos2)>,
    pub error: Option<anyhow::Error>,
}

fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x as f64, pos.y as f64)
}

fn target_note(target: PointerTarget) -> Option<NoteId> {
    match target {
        PointerTarget::Background => None,
        PointerTarget::DragHandle(id)
        | PointerTarget::ResizeHandle(id)
        | PointerTarget::NoteBody(id) => Some(id),
    }
}

/// Draw the board and feed pointer input into the session.
///
/// With `interactive == false` the board is drawn but ignores the pointer,
/// which is how the editor and delete prompt make it inert.
pub fn show<S: NoteStore>(
    ui: &mut egui::Ui,
    session: &mut BoardSession<S>,
    textures: &mut TextureCache,
    interactive: bool,
) -> CanvasOutput {
    let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    session.set_viewport_rect(
        to_point(rect.min),
        Point::new(rect.width() as f64, rect.height() as f64),
    );

    let mut out = CanvasOutput::default();
    if interactive {
        handle_input(ui, rect, session, &mut out);
    }

    ui.painter_at(rect).rect_filled(rect, 0.0, theme::BOARD_BACKGROUND);
    for note in session.render() {
        paint_note(ui, rect, &note, textures);
    }

    let cursor = match session.gestures().state() {
        GestureState::Idle => None,
        GestureState::Panning { .. } => Some(egui::CursorIcon::Grabbing),
        GestureState::MovingNote { .. } => Some(egui::CursorIcon::Move),
        GestureState::ResizingNote { .. } => {
            Some(egui::CursorIcon::ResizeSouthEast)
        }
    };
    if let Some(icon) = cursor {
        ui.ctx().set_cursor_icon(icon);
    }
    out
}

fn handle_input<S: NoteStore>(
    ui: &egui::Ui,
    rect: Rect,
    session: &mut BoardSession<S>,
    out: &mut CanvasOutput,
) {
    let (pressed, released, double, secondary, pos, scroll) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.button_double_clicked(egui::PointerButton::Primary),
            i.pointer.secondary_clicked(),
            i.pointer.interact_pos(),
            i.raw_scroll_delta.y,
        )
    });
    let Some(pos) = pos else {
        return;
    };
    let pointer = to_point(pos);
    let over_board = ui.rect_contains_pointer(rect);

    if over_board && scroll != 0.0 {
        // Scrolling down zooms out.
        session.wheel(-scroll as f64, pointer);
    }

    if pressed && over_board {
        session.pointer_down(pointer);
    }
    if !session.gestures().is_idle() {
        session.pointer_move(pointer);
    }
    if released {
        if let Err(e) = session.pointer_up(pointer) {
            out.error = Some(e);
        }
    }

    if over_board && double {
        out.open_note = session.double_click_target(pointer);
    }
    if over_board && secondary {
        if let Some(id) = target_note(session.hit_test(pointer)) {
            out.context_menu = Some((id, pos));
        }
    }
}

fn paint_note(ui: &mut egui::Ui, canvas: Rect, note: &RenderedNote, textures: &mut TextureCache) {
    let scale = note.scale as f32;
    let rect = Rect::from_min_size(
        egui::pos2(note.rect.x as f32, note.rect.y as f32),
        egui::vec2(note.rect.width as f32, note.rect.height as f32),
    );
    if !rect.intersects(canvas) {
        return;
    }
    let painter = ui.painter_at(canvas);
    let fill = theme::note_fill(&note.color);
    let header_h = HEADER_HEIGHT as f32 * scale;
    let footer_h = FOOTER_HEIGHT * scale;

    painter.rect_filled(
        rect.translate(egui::vec2(3.0, 3.0) * scale),
        0.0,
        theme::INK.gamma_multiply(0.35),
    );
    painter.rect_filled(rect, 0.0, fill);
    let header = Rect::from_min_size(rect.min, egui::vec2(rect.width(), header_h));
    painter.rect_filled(header, 0.0, theme::shade(fill, 0.85));
    painter.rect_stroke(rect, 0.0, Stroke::new(2.0 * scale, theme::INK));

    let chrome_font = egui::FontId::proportional(CHROME_FONT_SIZE * scale);
    painter.text(
        header.left_center() + egui::vec2(BODY_PADDING * scale, 0.0),
        egui::Align2::LEFT_CENTER,
        &note.created_label,
        chrome_font.clone(),
        theme::INK,
    );
    painter.text(
        egui::pos2(rect.left() + BODY_PADDING * scale, rect.bottom() - footer_h / 2.0),
        egui::Align2::LEFT_CENTER,
        &note.updated_label,
        chrome_font,
        theme::INK.gamma_multiply(0.7),
    );

    let grip = RESIZE_HANDLE_SIZE as f32 * scale;
    let corner = rect.right_bottom();
    for step in [0.3, 0.6, 0.9] {
        painter.line_segment(
            [corner - egui::vec2(grip * step, 2.0), corner - egui::vec2(2.0, grip * step)],
            Stroke::new(1.0 * scale, theme::INK),
        );
    }

    let body = Rect::from_min_max(
        rect.min + egui::vec2(BODY_PADDING * scale, header_h + BODY_PADDING * scale),
        rect.max - egui::vec2(BODY_PADDING * scale, footer_h),
    );
    if body.width() <= 0.0 || body.height() <= 0.0 {
        return;
    }
    let mut child = ui.child_ui(body, egui::Layout::top_down(egui::Align::Min));
    child.set_clip_rect(body.intersect(canvas));
    paint_spans(&mut child, &note.spans, scale, textures);
}

fn paint_spans(ui: &mut egui::Ui, spans: &[DisplaySpan], scale: f32, textures: &mut TextureCache) {
    let max_width = ui.available_width();
    ui.spacing_mut().item_spacing = egui::vec2(0.0, 4.0 * scale);
    ui.horizontal_wrapped(|ui| {
        for span in spans {
            match span {
                DisplaySpan::Text { text, strike } => {
                    let mut rich = egui::RichText::new(text)
                        .size(BODY_FONT_SIZE * scale)
                        .color(theme::INK);
                    if *strike {
                        rich = rich.strikethrough();
                    }
                    ui.add(egui::Label::new(rich).selectable(false));
                }
                DisplaySpan::Image(data_url) => {
                    let Some(tex) = textures.get(ui.ctx(), data_url) else {
                        ui.label(egui::RichText::new("[image]").color(Color32::DARK_RED));
                        continue;
                    };
                    let mut size = tex.size_vec2() * scale;
                    if size.x > max_width {
                        size *= max_width / size.x;
                    }
                    ui.end_row();
                    ui.add(egui::Image::new(&tex).fit_to_exact_size(size));
                    ui.end_row();
                }
            }
        }
    });
}
