//! Command and query surface of the animation editor.
//!
//! [`ImageEditor`] owns one [`EditorState`] and one [`History`]. Hosts drive
//! it with [`Command`]s and read projections back through queries; every
//! command either commits completely or leaves the editor as it was.

use log::{debug, info};

use crate::animation::{AnimationState, Frame, ZoomChange};
use crate::bitmap::{Bitmap, LiteralFormat};
use crate::error::EditorError;
use crate::history::{History, UndoOutcome};
use crate::persist::{self, Snapshot};
use crate::schema::{EditorConfig, EditorState};

/// Inbound commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a fresh session with these frames. Clears undo and redo.
    SetInitialFrames { frames: Vec<Frame>, interval: u32 },
    /// Restore editor settings and a timeline (last element becomes present).
    SetInitialState {
        editor: EditorState,
        past: Vec<AnimationState>,
    },
    /// Replace the current frame's bitmap.
    ImageEdit(Bitmap),
    /// Zoom by `delta` steps; `0` returns to auto-fit.
    ChangeZoom(i32),
    Undo,
    Redo,
    SetCurrentFrame(usize),
    /// Move the cursor by this many frames, wrapping.
    AdvanceFrame(i32),
    AddFrame,
    DuplicateFrame(usize),
    DeleteFrame(usize),
    MoveFrame { from: usize, to: usize },
    ChangeInterval(u32),
    Resize { width: usize, height: usize },
    SetEditorState(EditorState),
}

/// What a successfully handled command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    NothingToUndo,
    NothingToRedo,
}

impl From<UndoOutcome> for CommandOutcome {
    fn from(value: UndoOutcome) -> Self {
        match value {
            UndoOutcome::Applied => CommandOutcome::Applied,
            UndoOutcome::NothingToUndo => CommandOutcome::NothingToUndo,
            UndoOutcome::NothingToRedo => CommandOutcome::NothingToRedo,
        }
    }
}

/// A single editing session.
#[derive(Debug, Clone)]
pub struct ImageEditor {
    config: EditorConfig,
    editor: EditorState,
    history: History,
}

impl ImageEditor {
    /// New session with one blank frame sized by `config`.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        let present = AnimationState::blank(
            config.default_width,
            config.default_height,
            config.default_interval,
        )?;
        Ok(Self {
            history: History::with_max_past(present, config.max_past),
            editor: EditorState::default(),
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Handle one command.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, EditorError> {
        match command {
            Command::SetInitialFrames { frames, interval } => {
                let present = self.history.present().set_frames(frames, interval)?;
                info!(
                    "Starting session with {} frames at {}ms",
                    present.frame_count(),
                    present.interval()
                );
                self.history = History::with_max_past(present, self.config.max_past);
            }
            Command::SetInitialState { editor, past } => {
                persist::restore(
                    Some(Snapshot { editor, past }),
                    &mut self.editor,
                    &mut self.history,
                );
            }
            Command::ImageEdit(bitmap) => {
                self.history
                    .try_edit(|state| state.set_current_frame_bitmap(bitmap))?;
            }
            Command::ChangeZoom(delta) => self.change_zoom(delta),
            Command::Undo => return Ok(self.history.undo().into()),
            Command::Redo => return Ok(self.history.redo().into()),
            Command::SetCurrentFrame(index) => {
                let next = self.history.present().set_current_frame(index)?;
                self.history.replace_present(next);
            }
            Command::AdvanceFrame(direction) => {
                let next = self.history.present().advance_current_frame(direction);
                self.history.replace_present(next);
            }
            Command::AddFrame => self.history.try_edit(AnimationState::add_frame)?,
            Command::DuplicateFrame(index) => {
                self.history.try_edit(|state| state.duplicate_frame(index))?
            }
            Command::DeleteFrame(index) => {
                self.history.try_edit(|state| state.delete_frame(index))?
            }
            Command::MoveFrame { from, to } => {
                self.history.try_edit(|state| state.move_frame(from, to))?
            }
            Command::ChangeInterval(interval) => {
                self.history.try_edit(|state| state.set_interval(interval))?
            }
            Command::Resize { width, height } => {
                self.history.try_edit(|state| state.resize(width, height))?
            }
            Command::SetEditorState(editor) => self.editor = editor,
        }
        Ok(CommandOutcome::Applied)
    }

    /// Start a single-frame session.
    pub fn init_single_frame(&mut self, bitmap: Bitmap) -> Result<(), EditorError> {
        self.init_animation(vec![bitmap], self.config.default_interval)
    }

    /// Start a multi-frame session.
    pub fn init_animation(&mut self, frames: Vec<Bitmap>, interval: u32) -> Result<(), EditorError> {
        let frames = frames.into_iter().map(Frame::new).collect();
        self.apply(Command::SetInitialFrames { frames, interval })?;
        Ok(())
    }

    /// Replace the current frame's bitmap.
    pub fn image_edit(&mut self, bitmap: Bitmap) -> Result<(), EditorError> {
        self.apply(Command::ImageEdit(bitmap))?;
        Ok(())
    }

    /// Step the zoom by `delta`, or refit when `delta` is 0. Not undoable.
    pub fn change_zoom(&mut self, delta: i32) {
        let next = self
            .history
            .present()
            .set_zoom(ZoomChange::from_delta(delta), &self.config.zoom);
        debug!("Zoom {} -> {}", self.history.present().zoom(), next.zoom());
        self.history.replace_present(next);
    }

    pub fn undo(&mut self) -> CommandOutcome {
        self.history.undo().into()
    }

    pub fn redo(&mut self) -> CommandOutcome {
        self.history.redo().into()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn present(&self) -> &AnimationState {
        self.history.present()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn editor_state(&self) -> &EditorState {
        &self.editor
    }

    /// Literal for the frame under the cursor.
    pub fn current_frame_literal(&self, format: LiteralFormat) -> Result<String, EditorError> {
        let frame = self.history.present().current_frame()?;
        Ok(persist::frame_to_literal(frame, format))
    }

    /// `[lit0,lit1,...]` for every frame.
    pub fn all_frames_literal(&self, format: LiteralFormat) -> String {
        persist::frames_to_literal(self.history.present(), format)
    }

    /// Playback interval in milliseconds.
    pub fn interval(&self) -> u32 {
        self.history.present().interval()
    }

    /// Snapshot of editor settings and the visible timeline.
    pub fn persistent_data(&self) -> Snapshot {
        persist::snapshot(&self.editor, &self.history)
    }

    /// Restore a previously captured snapshot. `None` keeps the current
    /// session. Returns whether anything was restored.
    pub fn restore_persistent_data(&mut self, snapshot: Option<Snapshot>) -> bool {
        persist::restore(snapshot, &mut self.editor, &mut self.history)
    }
}
