//! Bitmap module - Palette-indexed pixel grids and their textual literal form.
//!
//! The flat buffer (`Bitmap::from_buffer` / `Bitmap::to_buffer`) and the
//! image literal (`Bitmap::to_literal` / `Bitmap::parse_literal`) are two
//! independent codecs over the same in-memory grid.

mod grid;
mod literal;

pub use grid::*;
pub use literal::{LiteralError, LiteralFormat, decode as decode_literal, encode as encode_literal};
