//! Crate-level error type.

use crate::animation::AnimationError;
use crate::bitmap::{LiteralError, ShapeError};
use crate::persist::PersistError;
use crate::schema::ConfigError;

/// Any error a command or query can surface.
///
/// Structural errors abort the command that caused them; the history is
/// left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Invalid bitmap: {0}")]
    Shape(#[from] ShapeError),
    #[error("Invalid animation edit: {0}")]
    Animation(#[from] AnimationError),
    #[error("Invalid image literal: {0}")]
    Literal(#[from] LiteralError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
