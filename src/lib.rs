//! Sprite animation editing core.
//!
//! This crate holds the state machine behind a multi-frame sprite editor:
//! palette-indexed bitmaps, the frame sequence being edited, undo/redo over
//! that sequence, and persistence of the whole timeline.
//!
//! # Architecture
//!
//! - `bitmap`: Pixel grids plus their buffer and image-literal codecs
//! - `animation`: Frames and pure frame-sequence operations
//! - `history`: Present/past/future undo engine
//! - `persist`: Snapshots, literal projection and session files
//! - `editor`: Command/query surface used by hosts
//! - `schema`: Configuration and editor settings
//!
//! # Example
//!
//! ```rust,no_run
//! use sprite_anim::{
//!     bitmap::{Bitmap, LiteralFormat},
//!     editor::{Command, ImageEditor},
//!     schema::EditorConfig,
//! };
//!
//! let mut editor = ImageEditor::new(EditorConfig::default())?;
//! let bitmap = Bitmap::blank(16, 16)?.with_pixel(3, 4, 2)?;
//! editor.apply(Command::ImageEdit(bitmap))?;
//! editor.apply(Command::Undo)?;
//!
//! println!("{}", editor.current_frame_literal(LiteralFormat::TypeScript)?);
//! let snapshot = editor.persistent_data();
//! println!("{} states saved", snapshot.past.len());
//! # Ok::<(), sprite_anim::EditorError>(())
//! ```

pub mod animation;
pub mod bitmap;
pub mod editor;
pub mod error;
pub mod history;
pub mod persist;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use animation::{AnimationState, Frame};
pub use bitmap::{Bitmap, LiteralFormat};
pub use editor::{Command, CommandOutcome, ImageEditor};
pub use error::EditorError;
pub use history::History;
pub use persist::Snapshot;
pub use schema::{EditorConfig, EditorState};
