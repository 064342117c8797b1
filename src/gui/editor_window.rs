use super::textures::TextureCache;
use crate::board::note::NoteId;
use crate::editor::{NoteEditor, Segment};
use eframe::egui;

const PREVIEW_MAX_WIDTH: f32 = 320.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Save,
    Cancel,
    PasteImage,
    Delete(NoteId),
}

/// Modal editor window. Text runs are editable in place; images are shown
/// as previews that can be removed.
pub fn show(ctx: &egui::Context, editor: &mut NoteEditor, textures: &mut TextureCache) -> EditorAction {
    if !editor.is_open() {
        return EditorAction::None;
    }
    let mut action = EditorAction::None;
    let mut remove = None;
    let mut open = true;
    egui::Window::new(editor.title())
        .collapsible(false)
        .resizable(true)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                for (idx, segment) in editor.segments.iter_mut().enumerate() {
                    match segment {
                        Segment::Text(text) => {
                            ui.add(
                                egui::TextEdit::multiline(text)
                                    .desired_width(f32::INFINITY)
                                    .desired_rows(3)
                                    .hint_text("Write something..."),
                            );
                        }
                        Segment::Image(data_url) => {
                            ui.horizontal(|ui| {
                                match textures.get(ctx, data_url) {
                                    Some(tex) => {
                                        let mut size = tex.size_vec2();
                                        if size.x > PREVIEW_MAX_WIDTH {
                                            size *= PREVIEW_MAX_WIDTH / size.x;
                                        }
                                        ui.add(egui::Image::new(&tex).fit_to_exact_size(size));
                                    }
                                    None => {
                                        ui.label("[unreadable image]");
                                    }
                                }
                                if ui.small_button("✕").on_hover_text("Remove image").clicked() {
                                    remove = Some(idx);
                                }
                            });
                        }
                    }
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Paste image").clicked() {
                    action = EditorAction::PasteImage;
                }
                if ui.button("Save").on_hover_text("Ctrl+Enter").clicked() {
                    action = EditorAction::Save;
                }
                if let Some(id) = editor.editing_id() {
                    if ui.button("Delete").clicked() {
                        action = EditorAction::Delete(id);
                    }
                }
                if ui.button("Cancel").on_hover_text("Escape").clicked() {
                    action = EditorAction::Cancel;
                }
            });
        });
    if let Some(idx) = remove {
        editor.remove_segment(idx);
    }
    if !open {
        action = EditorAction::Cancel;
    }
    action
}
