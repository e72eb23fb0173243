//! Textual image literals.
//!
//! A literal is a block of hex glyphs, one row per line, wrapped in the
//! image-literal syntax of the target language:
//!
//! ```text
//! img`
//! . 1 .
//! f . a
//! `
//! ```
//!
//! `.` is palette index 0 (transparent), `1`-`9` and `a`-`f` the rest.

use std::fmt;
use std::str::FromStr;

use super::grid::{Bitmap, ShapeError};

const GLYPHS: &[u8; 16] = b".123456789abcdef";

/// Target language syntax for image literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LiteralFormat {
    /// ``img`...` `` tagged template.
    #[default]
    TypeScript,
    /// `img("""...""")` call with a triple-quoted string.
    Python,
}

impl LiteralFormat {
    pub const ALL: &'static [LiteralFormat] = &[LiteralFormat::TypeScript, LiteralFormat::Python];

    /// Short tag used on the command line and across the host boundary.
    pub fn tag(self) -> &'static str {
        match self {
            LiteralFormat::TypeScript => "ts",
            LiteralFormat::Python => "py",
        }
    }

    fn open(self) -> &'static str {
        match self {
            LiteralFormat::TypeScript => "img`",
            LiteralFormat::Python => "img(\"\"\"",
        }
    }

    fn close(self) -> &'static str {
        match self {
            LiteralFormat::TypeScript => "`",
            LiteralFormat::Python => "\"\"\")",
        }
    }
}

impl fmt::Display for LiteralFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LiteralFormat {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ts" | "typescript" => Ok(LiteralFormat::TypeScript),
            "py" | "python" => Ok(LiteralFormat::Python),
            _ => Err(LiteralError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors from parsing an image literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("Unknown literal format: {0}")]
    UnknownFormat(String),
    #[error("Text is not wrapped in a known image literal")]
    MissingWrapper,
    #[error("Invalid glyph {glyph:?} on row {row}")]
    InvalidGlyph { row: usize, glyph: char },
    #[error("Row {row} has {actual} pixels, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

fn glyph_value(c: char) -> Option<u8> {
    match c {
        '.' => Some(0),
        '#' => Some(15),
        _ => c.to_digit(16).map(|d| d as u8),
    }
}

/// Render `bitmap` in the given syntax. Deterministic.
pub fn encode(bitmap: &Bitmap, format: LiteralFormat) -> String {
    // Two bytes per cell plus a newline per row.
    let mut out = String::with_capacity(
        format.open().len() + bitmap.as_slice().len() * 2 + bitmap.height() + 8,
    );
    out.push_str(format.open());
    if !bitmap.is_empty() {
        for row in bitmap.rows() {
            out.push('\n');
            for &value in row {
                out.push(GLYPHS[value as usize] as char);
                out.push(' ');
            }
        }
    }
    out.push('\n');
    out.push_str(format.close());
    out
}

/// Parse a literal in any supported syntax back into a bitmap.
pub fn decode(text: &str) -> Result<Bitmap, LiteralError> {
    let text = text.trim();
    let body = LiteralFormat::ALL
        .iter()
        .find_map(|format| {
            text.strip_prefix(format.open())
                .and_then(|rest| rest.strip_suffix(format.close()))
        })
        .ok_or(LiteralError::MissingWrapper)?;

    let mut width = 0;
    let mut height = 0;
    let mut pixels = Vec::new();
    for line in body.lines() {
        let start = pixels.len();
        for glyph in line.chars().filter(|c| !c.is_whitespace()) {
            let value = glyph_value(glyph).ok_or(LiteralError::InvalidGlyph { row: height, glyph })?;
            pixels.push(value);
        }
        let row_len = pixels.len() - start;
        if row_len == 0 {
            continue;
        }
        if height == 0 {
            width = row_len;
        } else if row_len != width {
            return Err(LiteralError::RaggedRow {
                row: height,
                expected: width,
                actual: row_len,
            });
        }
        height += 1;
    }

    Ok(Bitmap::from_buffer(width, height, pixels)?)
}
