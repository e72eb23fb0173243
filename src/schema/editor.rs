//! Tool and session settings that live outside the undo timeline.

use serde::{Deserialize, Serialize};

/// Default 16-colour palette. Index 0 is transparent.
pub const DEFAULT_PALETTE: [&str; 16] = [
    "#000000", "#ffffff", "#ff2121", "#ff93c4", "#ff8135", "#fff609", "#249ca3", "#78dc52",
    "#003fad", "#87f2ff", "#8e2ec4", "#a4839f", "#5c406c", "#e5cdc4", "#91463d", "#000000",
];

/// Drawing tool identifier. Tool behaviour lives in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Line,
    Rectangle,
    Circle,
    Marquee,
    Pan,
}

/// Editor session state. Persisted alongside the history, never undone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    /// Palette index used by drawing tools.
    pub selected_color: u8,
    /// Palette index shown behind transparent pixels.
    pub background_color: u8,
    pub tool: Tool,
    /// Brush size in pixels.
    pub cursor_size: u8,
    /// Hex colours, one per palette index.
    pub colors: Vec<String>,
    pub preview_animating: bool,
    pub onion_skin_enabled: bool,
    pub overlay_enabled: bool,
    pub aspect_ratio_locked: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            selected_color: 1,
            background_color: 0,
            tool: Tool::default(),
            cursor_size: 1,
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            preview_animating: false,
            onion_skin_enabled: false,
            overlay_enabled: false,
            aspect_ratio_locked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let json = serde_json::to_value(EditorState::default()).unwrap();
        assert_eq!(json["selectedColor"], 1);
        assert_eq!(json["tool"], "pencil");
        assert_eq!(json["colors"].as_array().unwrap().len(), 16);
    }

    #[test]
    fn test_missing_fields_default() {
        let state: EditorState = serde_json::from_str(r#"{"tool":"fill"}"#).unwrap();
        assert_eq!(state.tool, Tool::Fill);
        assert_eq!(state.cursor_size, 1);
    }
}
