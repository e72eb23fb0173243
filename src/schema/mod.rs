//! Schema module - Session configuration and editor settings.

mod config;
mod editor;

pub use config::*;
pub use editor::*;
