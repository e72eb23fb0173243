//! Animation module - Frames and the frame sequence being edited.
//!
//! An [`AnimationState`] is a plain value: every edit builds a new one, which
//! is what lets [`crate::history::History`] keep old states around for undo
//! without copying anything eagerly.

mod frame;
mod state;

pub use frame::{FloatingLayer, Frame};
pub use state::{AnimationError, AnimationState, ZoomChange};
