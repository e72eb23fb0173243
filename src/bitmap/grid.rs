//! Palette-indexed pixel grid.

use serde::{Deserialize, Serialize};

use super::literal::{self, LiteralError, LiteralFormat};

/// Number of palette entries a pixel may reference.
pub const PALETTE_SIZE: u8 = 16;

/// Errors raised when a pixel buffer does not describe a valid bitmap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("Pixel buffer has {actual} cells, expected {expected} for {width}x{height}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Pixel {index} has palette index {value} (palette holds {size} colors)", size = PALETTE_SIZE)]
    PaletteOverflow { index: usize, value: u8 },
    #[error("Bitmap dimensions {width}x{height} are degenerate or too large")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} bitmap")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// Immutable grid of palette indices, stored row-major.
///
/// Every edit produces a new `Bitmap`; equality compares dimensions and
/// cell values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BitmapData", into = "BitmapData")]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

/// Serialized form of a bitmap. Validated on the way in.
#[derive(Serialize, Deserialize)]
struct BitmapData {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl TryFrom<BitmapData> for Bitmap {
    type Error = ShapeError;

    fn try_from(value: BitmapData) -> Result<Self, Self::Error> {
        Bitmap::from_buffer(value.width, value.height, value.data)
    }
}

impl From<Bitmap> for BitmapData {
    fn from(value: Bitmap) -> Self {
        Self {
            width: value.width,
            height: value.height,
            data: value.pixels,
        }
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize, ShapeError> {
    // A grid with exactly one zero side has no textual form distinct from 0x0.
    if (width == 0) != (height == 0) {
        return Err(ShapeError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ShapeError::InvalidDimensions { width, height })
}

impl Bitmap {
    /// Build a bitmap from a row-major buffer of palette indices.
    pub fn from_buffer(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, ShapeError> {
        let expected = cell_count(width, height)?;
        if pixels.len() != expected {
            return Err(ShapeError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        if let Some((index, &value)) = pixels.iter().enumerate().find(|(_, v)| **v >= PALETTE_SIZE)
        {
            return Err(ShapeError::PaletteOverflow { index, value });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// All-transparent bitmap.
    pub fn blank(width: usize, height: usize) -> Result<Self, ShapeError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major palette indices, `width * height` long.
    pub fn to_buffer(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) panics, and a 0x0 bitmap has no rows anyway.
        self.pixels.chunks(self.width.max(1))
    }

    /// Palette index at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Copy of this bitmap with one pixel changed.
    pub fn with_pixel(&self, x: usize, y: usize, value: u8) -> Result<Self, ShapeError> {
        if x >= self.width || y >= self.height {
            return Err(ShapeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if value >= PALETTE_SIZE {
            return Err(ShapeError::PaletteOverflow {
                index: y * self.width + x,
                value,
            });
        }
        let mut pixels = self.pixels.clone();
        pixels[y * self.width + x] = value;
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    /// Crop or pad to new dimensions, anchored at the top-left corner.
    /// Padding is transparent.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self, ShapeError> {
        let mut out = Self::blank(width, height)?;
        let copy_w = width.min(self.width);
        for y in 0..height.min(self.height) {
            let src = y * self.width;
            let dst = y * width;
            out.pixels[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }
        Ok(out)
    }

    /// Draw `other` on top of this bitmap at `(x, y)`.
    ///
    /// Transparent (0) pixels of `other` leave the base untouched and
    /// anything falling outside the base is clipped.
    pub fn paste(&self, other: &Bitmap, x: i32, y: i32) -> Self {
        let mut pixels = self.pixels.clone();
        for (row_index, row) in other.rows().enumerate() {
            let ty = y as i64 + row_index as i64;
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for (col, &value) in row.iter().enumerate() {
                let tx = x as i64 + col as i64;
                if value == 0 || tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                pixels[ty as usize * self.width + tx as usize] = value;
            }
        }
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Render as source text in the given target syntax.
    pub fn to_literal(&self, format: LiteralFormat) -> String {
        literal::encode(self, format)
    }

    /// Parse a literal produced by [`Bitmap::to_literal`] in any format.
    pub fn parse_literal(text: &str) -> Result<Self, LiteralError> {
        literal::decode(text)
    }
}
