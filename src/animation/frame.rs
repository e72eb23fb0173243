//! A single animation frame.

use serde::{Deserialize, Serialize};

use crate::bitmap::{Bitmap, ShapeError};

/// Pixels lifted off the frame (e.g. a moved selection), drawn on top of it
/// at an offset until they are committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingLayer {
    pub bitmap: Bitmap,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// One bitmap plus per-frame metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub bitmap: Bitmap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating: Option<FloatingLayer>,
}

impl Frame {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            floating: None,
        }
    }

    /// Transparent frame of the given size.
    pub fn blank(width: usize, height: usize) -> Result<Self, ShapeError> {
        Ok(Self::new(Bitmap::blank(width, height)?))
    }

    pub fn with_floating(mut self, layer: FloatingLayer) -> Self {
        self.floating = Some(layer);
        self
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.bitmap.dimensions()
    }

    /// The bitmap a viewer sees: the base with any floating layer composited on top.
    pub fn project_to_bitmap(&self) -> Bitmap {
        match &self.floating {
            Some(layer) => self
                .bitmap
                .paste(&layer.bitmap, layer.offset_x, layer.offset_y),
            None => self.bitmap.clone(),
        }
    }
}

impl From<Bitmap> for Frame {
    fn from(bitmap: Bitmap) -> Self {
        Self::new(bitmap)
    }
}
