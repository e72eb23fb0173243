//! Persistence for editing sessions.
//!
//! A [`Snapshot`] captures the editor settings and the visible timeline
//! (`past ++ [present]`). Redo entries are dropped on purpose, so a reloaded
//! session always starts with an empty redo stack.
//!
//! Snapshots are plain JSON; [`store`] adds a small binary header so saved
//! sessions can be recognised and optionally LZ4 compressed.

mod codec;
mod format;
pub mod store;

pub use codec::{
    Snapshot, decode_snapshot, encode_snapshot, frame_to_literal, frames_to_literal, restore,
    snapshot,
};
pub use format::{CompressionType, SESSION_MAGIC, SESSION_VERSION, SessionFlags, SessionHeader};
pub use store::{PersistError, load_snapshot, save_snapshot};
