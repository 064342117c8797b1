use crate::board::note::NoteId;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    None,
    Confirmed(NoteId),
    Cancelled,
}

/// "Delete this note?" prompt.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfirmation {
    pending: Option<NoteId>,
}

impl DeleteConfirmation {
    pub fn open_for(&mut self, id: NoteId) {
        self.pending = Some(id);
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> ConfirmationResult {
        let Some(id) = self.pending else {
            return ConfirmationResult::None;
        };
        let mut result = ConfirmationResult::None;
        let mut open = true;
        egui::Window::new("DELETE_NOTE")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Delete this note?");
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        result = ConfirmationResult::Confirmed(id);
                    }
                    if ui.button("Cancel").clicked() {
                        result = ConfirmationResult::Cancelled;
                    }
                });
            });
        if result != ConfirmationResult::None {
            self.pending = None;
        }
        if !open {
            self.pending = None;
            if result == ConfirmationResult::None {
                result = ConfirmationResult::Cancelled;
            }
        }
        result
    }
}
