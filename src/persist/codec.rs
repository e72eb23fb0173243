//! Snapshot capture/restore and literal projection.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationState, Frame};
use crate::bitmap::LiteralFormat;
use crate::history::History;
use crate::schema::EditorState;

/// Persisted session: editor settings plus the visible timeline.
///
/// `past` ends with the state that was on screen when the snapshot was
/// taken. Redo entries are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub editor: EditorState,
    pub past: Vec<AnimationState>,
}

/// Capture `editor` and the history's visible timeline.
pub fn snapshot(editor: &EditorState, history: &History) -> Snapshot {
    let mut past = Vec::with_capacity(history.past().len() + 1);
    past.extend_from_slice(history.past());
    past.push(history.present().clone());
    Snapshot {
        editor: editor.clone(),
        past,
    }
}

/// Restore a snapshot into `editor` and `history`.
///
/// An absent snapshot is a first run and leaves both untouched. Returns
/// whether anything was restored.
pub fn restore(snapshot: Option<Snapshot>, editor: &mut EditorState, history: &mut History) -> bool {
    let Some(snapshot) = snapshot else {
        debug!("No snapshot to restore, keeping current session");
        return false;
    };
    debug!("Restoring snapshot with {} timeline states", snapshot.past.len());
    *editor = snapshot.editor;
    history.reset(snapshot.past);
    true
}

/// Serialize a snapshot to JSON.
pub fn encode_snapshot(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

/// Parse a snapshot from JSON. Malformed input is treated as "no prior
/// state" and logged.
pub fn decode_snapshot(json: &str) -> Option<Snapshot> {
    match serde_json::from_str(json) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Ignoring malformed snapshot: {e}");
            None
        }
    }
}

/// Literal for the rendered content of `frame`.
pub fn frame_to_literal(frame: &Frame, format: LiteralFormat) -> String {
    frame.project_to_bitmap().to_literal(format)
}

/// Bracketed, comma-joined literals for every frame of `state`.
pub fn frames_to_literal(state: &AnimationState, format: LiteralFormat) -> String {
    let literals: Vec<String> = state
        .frames()
        .iter()
        .map(|frame| frame_to_literal(frame, format))
        .collect();
    format!("[{}]", literals.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::schema::Tool;

    fn state(value: u8) -> AnimationState {
        let frame = Frame::new(Bitmap::from_buffer(2, 2, vec![value; 4]).unwrap());
        AnimationState::new(vec![frame], 100).unwrap()
    }

    fn sample_history() -> History {
        let mut history = History::new(state(0));
        history.edit(state(1));
        history.edit(state(2));
        history
    }

    #[test]
    fn test_snapshot_appends_present() {
        let history = sample_history();
        let snap = snapshot(&EditorState::default(), &history);
        assert_eq!(snap.past, vec![state(0), state(1), state(2)]);
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut source = sample_history();
        source.undo();
        let editor = EditorState {
            tool: Tool::Fill,
            ..Default::default()
        };
        let snap = snapshot(&editor, &source);

        let mut restored_editor = EditorState::default();
        let mut restored = History::new(state(9));
        assert!(restore(Some(snap), &mut restored_editor, &mut restored));

        assert_eq!(restored_editor, editor);
        assert_eq!(restored.present(), source.present());
        assert_eq!(restored.past(), source.past());
        assert!(restored.future().is_empty());
    }

    #[test]
    fn test_restore_absent_is_noop() {
        let mut editor = EditorState::default();
        let mut history = sample_history();
        let before = history.clone();
        assert!(!restore(None, &mut editor, &mut history));
        assert_eq!(history, before);
    }

    #[test]
    fn test_json_roundtrip_and_malformed() {
        let snap = snapshot(&EditorState::default(), &sample_history());
        let json = encode_snapshot(&snap).unwrap();
        assert_eq!(decode_snapshot(&json), Some(snap));

        assert_eq!(decode_snapshot("not json"), None);
        // Structurally valid JSON with an invalid animation state.
        let bad = r#"{"editor":{},"past":[{"frames":[],"currentFrame":0,"interval":100}]}"#;
        assert_eq!(decode_snapshot(bad), None);
    }

    #[test]
    fn test_frames_to_literal() {
        let frames = vec![
            Frame::new(Bitmap::from_buffer(1, 1, vec![1]).unwrap()),
            Frame::new(Bitmap::from_buffer(1, 1, vec![2]).unwrap()),
        ];
        let state = AnimationState::new(frames, 100).unwrap();
        assert_eq!(
            frames_to_literal(&state, LiteralFormat::TypeScript),
            "[img`\n1 \n`,img`\n2 \n`]"
        );
    }
}
