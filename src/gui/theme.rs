use eframe::egui;

pub const BOARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(122, 158, 158);
pub const INK: egui::Color32 = egui::Color32::from_rgb(26, 42, 42);
pub const PAPER: egui::Color32 = egui::Color32::from_rgb(240, 240, 232);
pub const FALLBACK_NOTE: egui::Color32 = egui::Color32::from_rgb(232, 228, 160);

/// Parse `#rgb` or `#rrggbb`. Anything else yields `None`.
pub fn parse_hex_color(value: &str) -> Option<egui::Color32> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(egui::Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

pub fn note_fill(color: &str) -> egui::Color32 {
    parse_hex_color(color).unwrap_or(FALLBACK_NOTE)
}

/// Darken a fill for note chrome.
pub fn shade(color: egui::Color32, factor: f32) -> egui::Color32 {
    let f = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
    egui::Color32::from_rgb(f(color.r()), f(color.g()), f(color.b()))
}

/// Flat, high-contrast visuals matching the board's retro palette.
pub fn board_visuals(defaults: &egui::Visuals) -> egui::Visuals {
    let mut visuals = defaults.clone();
    visuals.dark_mode = false;
    visuals.window_fill = PAPER;
    visuals.panel_fill = PAPER;
    visuals.override_text_color = Some(INK);
    visuals.window_rounding = egui::Rounding::ZERO;
    visuals.window_stroke = egui::Stroke::new(2.0, INK);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, INK);
    visuals.widgets.inactive.rounding = egui::Rounding::ZERO;
    visuals.widgets.hovered.rounding = egui::Rounding::ZERO;
    visuals.widgets.active.rounding = egui::Rounding::ZERO;
    visuals
}
