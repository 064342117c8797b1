use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the note storage service.
pub type NoteId = i64;

/// Smallest width a note can be resized to, in board units.
pub const MIN_NOTE_WIDTH: f64 = 180.0;
/// Smallest height a note can be resized to, in board units.
pub const MIN_NOTE_HEIGHT: f64 = 120.0;

/// Size the storage service assigns to notes created without one.
pub const DEFAULT_NOTE_WIDTH: f64 = 250.0;
pub const DEFAULT_NOTE_HEIGHT: f64 = 200.0;

/// Color the storage service assigns to notes created without one.
pub const DEFAULT_NOTE_COLOR: &str = "#ffffa5";

/// Swatches offered by the toolbar when creating a note.
pub const PRESET_COLORS: [&str; 6] = [
    "#e8e4a0", // cream
    "#a0c8e8", // sky
    "#e8a0a0", // rose
    "#a0e8b0", // mint
    "#e8c8a0", // peach
    "#c8a0e8", // lilac
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Text,
    Markdown,
    Html,
}

/// A note as stored by the storage service and cached by the board.
///
/// Rows written by older clients may carry `null` (or a zero size) in place
/// of a value; those decode to the same fallbacks as an absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: ContentType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,
    /// Rows written before sizes were stored come back without one.
    #[serde(default = "fallback_width", deserialize_with = "width_or_fallback")]
    pub width: f64,
    #[serde(default = "fallback_height", deserialize_with = "height_or_fallback")]
    pub height: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub z_index: i64,
    #[serde(default = "default_color", deserialize_with = "color_or_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default)]
    pub metadata: Option<String>,
}

fn fallback_width() -> f64 {
    280.0
}

fn fallback_height() -> f64 {
    180.0
}

fn default_color() -> String {
    DEFAULT_NOTE_COLOR.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn positive_or<'de, D: Deserializer<'de>>(deserializer: D, fallback: f64) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|v| *v > 0.0)
        .unwrap_or(fallback))
}

fn width_or_fallback<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    positive_or(deserializer, fallback_width())
}

fn height_or_fallback<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    positive_or(deserializer, fallback_height())
}

fn color_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|c| !c.is_empty())
        .unwrap_or_else(default_color))
}

/// Body of a create request. Absent fields are filled in by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Partial update. Only the fields that are `Some` are sent and changed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NotePatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn z_index(z_index: i64) -> Self {
        Self {
            z_index: Some(z_index),
            ..Default::default()
        }
    }

    /// Apply the present fields to `note`, leaving the rest unchanged.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(content_type) = self.content_type {
            note.content_type = content_type;
        }
        if let Some(x) = self.x {
            note.x = x;
        }
        if let Some(y) = self.y {
            note.y = y;
        }
        if let Some(width) = self.width {
            note.width = width;
        }
        if let Some(height) = self.height {
            note.height = height;
        }
        if let Some(z_index) = self.z_index {
            note.z_index = z_index;
        }
        if let Some(color) = &self.color {
            note.color = color.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_row_with_missing_size() {
        let json = r##"{
            "id": 7,
            "content": "hello",
            "x": 10.5,
            "y": -4,
            "z_index": 3,
            "color": "#a0c8e8",
            "created_at": "2024-05-01 10:00:00",
            "updated_at": "2024-05-01 10:00:00",
            "metadata": null
        }"##;
        let note: Note = serde_json::from_str(json).expect("note should deserialize");
        assert_eq!(note.id, 7);
        assert_eq!(note.width, 280.0);
        assert_eq!(note.height, 180.0);
        assert_eq!(note.content_type, ContentType::Text);
    }

    #[test]
    fn null_and_zero_fields_fall_back() {
        let json = r#"[
            {"id": 1, "content": "a", "width": null, "height": null, "z_index": null,
             "color": null, "content_type": null, "x": null, "y": 5},
            {"id": 2, "content": "b", "width": 0, "height": -3, "z_index": 2}
        ]"#;
        let notes: Vec<Note> = serde_json::from_str(json).unwrap();
        assert_eq!((notes[0].width, notes[0].height), (280.0, 180.0));
        assert_eq!(notes[0].z_index, 0);
        assert_eq!(notes[0].color, DEFAULT_NOTE_COLOR);
        assert_eq!(notes[0].content_type, ContentType::Text);
        assert_eq!((notes[0].x, notes[0].y), (0.0, 5.0));
        assert_eq!((notes[1].width, notes[1].height), (280.0, 180.0));
        assert_eq!(notes[1].z_index, 2);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let json = serde_json::to_value(NotePatch::position(1.0, 2.0)).unwrap();
        assert_eq!(json, serde_json::json!({"x": 1.0, "y": 2.0}));

        let json = serde_json::to_value(NotePatch::z_index(-3)).unwrap();
        assert_eq!(json, serde_json::json!({"z_index": -3}));
    }

    #[test]
    fn patch_apply_leaves_absent_fields_alone() {
        let mut note = Note {
            id: 1,
            content: "a".into(),
            content_type: ContentType::Text,
            x: 1.0,
            y: 2.0,
            width: 250.0,
            height: 200.0,
            z_index: 4,
            color: "#fff".into(),
            created_at: String::new(),
            updated_at: String::new(),
            metadata: None,
        };
        NotePatch::size(300.0, 150.0).apply_to(&mut note);
        assert_eq!((note.x, note.y), (1.0, 2.0));
        assert_eq!((note.width, note.height), (300.0, 150.0));
        assert_eq!(note.z_index, 4);
    }
}
