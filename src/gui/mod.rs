mod canvas;
mod confirmation_modal;
mod editor_window;
mod textures;
pub mod theme;

pub use confirmation_modal::{ConfirmationResult, DeleteConfirmation};

use crate::board::note::{NoteId, PRESET_COLORS};
use crate::board::render::LayerCommand;
use crate::board::session::{BoardSession, SaveOutcome};
use crate::clipboard;
use crate::editor::{self, EditorKey, Segment};
use crate::storage::NoteStore;
use eframe::egui;
use editor_window::EditorAction;
use textures::TextureCache;

fn has_paste_event(events: &[egui::Event]) -> bool {
    events.iter().any(|e| matches!(e, egui::Event::Paste(_)))
}

#[derive(Debug, Clone, Copy)]
struct ContextMenu {
    id: NoteId,
    pos: egui::Pos2,
}

/// The desktop board: toolbar, canvas, context menu, editor and delete
/// prompt around a single [`BoardSession`].
pub struct BoardApp {
    session: BoardSession<Box<dyn NoteStore>>,
    textures: TextureCache,
    confirm: DeleteConfirmation,
    context_menu: Option<ContextMenu>,
    status: Option<String>,
}

impl BoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: BoardSession<Box<dyn NoteStore>>) -> Self {
        cc.egui_ctx.set_visuals(theme::board_visuals(&egui::Visuals::light()));
        Self {
            session,
            textures: TextureCache::default(),
            confirm: DeleteConfirmation::default(),
            context_menu: None,
            status: None,
        }
    }

    fn report(&mut self, what: &str, result: anyhow::Result<()>) {
        if let Err(e) = result {
            tracing::error!("{what}: {e:#}");
            self.status = Some(format!("{what}: {e}"));
        }
    }

    fn finish_save(&mut self, result: anyhow::Result<SaveOutcome>) {
        match result {
            Ok(SaveOutcome::Rejected) => {
                self.status = Some("Note is empty".into());
            }
            Ok(SaveOutcome::Created(_)) | Ok(SaveOutcome::Updated(_)) => {
                self.status = None;
            }
            Err(e) => self.report("Failed to save note", Err(e)),
        }
    }

    fn paste_into_editor(&mut self) {
        match clipboard::paste_image() {
            Ok(Some(url)) => self.session.editor.insert_image(url),
            Ok(None) => {}
            Err(e) => self.report("Failed to paste image", Err(e)),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() || !self.session.editor.is_open() {
            return;
        }
        for file in dropped {
            let bytes = match (&file.bytes, &file.path) {
                (Some(bytes), _) => bytes.to_vec(),
                (None, Some(path)) => match std::fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!("failed to read dropped file {}: {e}", path.display());
                        continue;
                    }
                },
                (None, None) => continue,
            };
            if let Some(url) = clipboard::paste_image_bytes(&bytes) {
                self.session.editor.insert_image(url);
            }
        }
    }

    fn editor_shortcuts(&mut self, ctx: &egui::Context) {
        if !self.session.editor.is_open() || self.confirm.is_open() {
            return;
        }
        let (escape, save) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::NONE, egui::Key::Escape),
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::Enter),
            )
        });
        // Ctrl/Cmd+V only arrives as a text paste event. An image-only
        // clipboard sends nothing; the "Paste image" button covers that.
        let paste = ctx.input(|i| has_paste_event(&i.events));
        if escape {
            let _ = self.session.editor_key(EditorKey::Escape, false);
        } else if save {
            let result = self.session.editor_key(EditorKey::Enter, true);
            if let Some(result) = result.transpose() {
                self.finish_save(result);
            }
        }
        if paste && self.session.editor.is_open() {
            self.paste_into_editor();
        }
    }

    /// Free textures for images no note or open editor refers to anymore.
    fn release_unused_images(&mut self) {
        let on_board = self
            .session
            .notes()
            .iter()
            .flat_map(|n| editor::image_urls(&n.content));
        let in_editor = self.session.editor.segments.iter().filter_map(|s| match s {
            Segment::Image(url) => Some(url.as_str()),
            Segment::Text(_) => None,
        });
        self.textures.retain_referenced(on_board.chain(in_editor));
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("+ New note").clicked() {
                self.context_menu = None;
                self.session.open_new_note();
            }
            ui.separator();
            for color in PRESET_COLORS {
                let fill = theme::note_fill(color);
                let selected = self.session.selected_color() == color;
                let stroke = if selected {
                    egui::Stroke::new(3.0, theme::INK)
                } else {
                    egui::Stroke::new(1.0, theme::INK)
                };
                let swatch = egui::Button::new("")
                    .fill(fill)
                    .stroke(stroke)
                    .min_size(egui::vec2(20.0, 20.0));
                if ui.add(swatch).on_hover_text(color).clicked() {
                    self.session.select_color(color);
                }
            }
            ui.separator();
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                self.session.zoom_out();
            }
            ui.label(self.session.viewport().zoom_label());
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                self.session.zoom_in();
            }
            if ui.button("Reset").on_hover_text("Reset view").clicked() {
                self.session.reset_zoom();
            }
            ui.separator();
            if ui.button("Refresh").clicked() {
                let result = self.session.refresh();
                self.report("Failed to load notes", result);
            }
        });
    }

    fn context_menu_ui(&mut self, ctx: &egui::Context) {
        let Some(menu) = self.context_menu else {
            return;
        };
        let mut close = false;
        let area = egui::Area::new(egui::Id::new("note_context_menu"))
            .order(egui::Order::Foreground)
            .fixed_pos(menu.pos)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    ui.set_min_width(150.0);
                    if ui.button("Edit").clicked() {
                        self.session.open_note(menu.id);
                        close = true;
                    }
                    if ui.button("Delete").clicked() {
                        self.confirm.open_for(menu.id);
                        close = true;
                    }
                    ui.separator();
                    for command in LayerCommand::ALL {
                        if ui.button(command.label()).clicked() {
                            let result = self.session.apply_layer(menu.id, command);
                            self.report("Failed to reorder note", result);
                            close = true;
                        }
                    }
                    ui.separator();
                    if ui.button("Copy as HTML").clicked() {
                        if let Some(html) = self.session.note_html(menu.id) {
                            let result = clipboard::set_text(&html);
                            self.report("Failed to copy note", result);
                        }
                        close = true;
                    }
                });
            });
        let clicked_outside = ctx.input(|i| {
            i.pointer.any_pressed()
                && i.pointer
                    .interact_pos()
                    .map_or(false, |p| !area.response.rect.contains(p))
        });
        if close || clicked_outside || self.session.note(menu.id).is_none() {
            self.context_menu = None;
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.editor_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} notes", self.session.notes().len()));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::DARK_RED, status);
                }
            });
        });

        let interactive = !self.session.editor.is_open() && !self.confirm.is_open();
        let output = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                canvas::show(ui, &mut self.session, &mut self.textures, interactive)
            })
            .inner;
        if let Some(e) = output.error {
            self.report("Failed to update note", Err(e));
        }
        if let Some(id) = output.open_note {
            self.context_menu = None;
            self.session.open_note(id);
        }
        if let Some((id, pos)) = output.context_menu {
            self.context_menu = Some(ContextMenu { id, pos });
        }

        self.context_menu_ui(ctx);

        match editor_window::show(ctx, &mut self.session.editor, &mut self.textures) {
            EditorAction::None => {}
            EditorAction::Save => {
                let result = self.session.save_edit();
                self.finish_save(result);
            }
            EditorAction::Cancel => self.session.cancel_edit(),
            EditorAction::PasteImage => self.paste_into_editor(),
            EditorAction::Delete(id) => self.confirm.open_for(id),
        }

        if let ConfirmationResult::Confirmed(id) = self.confirm.ui(ctx) {
            let result = self.session.delete_note(id);
            self.report("Failed to delete note", result);
        }

        self.release_unused_images();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_is_detected_from_paste_events_only() {
        let key_v = egui::Event::Key {
            key: egui::Key::V,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::COMMAND,
        };
        assert!(!has_paste_event(&[key_v]));
        assert!(has_paste_event(&[egui::Event::Paste("text".into())]));
        assert!(!has_paste_event(&[]));
    }
}
