use sticky_board::board::BoardSession;
use sticky_board::gui::BoardApp;
use sticky_board::logging;
use sticky_board::settings::Settings;
use sticky_board::storage::{HttpNoteStore, MemoryNoteStore, NoteStore};

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".into());
    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging, settings.log_file.clone());
    tracing::info!("starting with settings from {settings_path}");

    let store: Box<dyn NoteStore> = if settings.offline {
        tracing::info!("offline mode: notes are kept in memory");
        Box::new(MemoryNoteStore::new())
    } else {
        Box::new(HttpNoteStore::new(
            &settings.server_url,
            settings.request_timeout(),
        )?)
    };

    let mut session = BoardSession::new(store);
    session.select_color(settings.default_color.clone());
    if let Err(e) = session.refresh() {
        tracing::error!("failed to load notes: {e:#}");
    }

    let (w, h) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w as f32, h as f32])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sticky Board",
        native_options,
        Box::new(move |cc| Box::new(BoardApp::new(cc, session))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run ui: {e}"))
}
