//! Frame sequence with a playback cursor, interval and zoom.
//!
//! Every operation is pure: it returns a new [`AnimationState`] and leaves
//! `self` untouched, so a failed operation never disturbs the caller's value.

use serde::{Deserialize, Serialize};

use super::frame::Frame;
use crate::bitmap::{Bitmap, ShapeError};
use crate::schema::{AUTO_ZOOM, ZoomLimits};

/// Errors from frame sequence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("Frame index {index} out of range ({len} frames)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Animation must contain at least one frame")]
    EmptyAnimation,
    #[error("Playback interval must be positive")]
    InvalidInterval,
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// A requested zoom change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomChange {
    /// Return to the auto-fit scale.
    Fit,
    /// Step in (positive) or out (negative) from the current zoom.
    By(i32),
}

impl ZoomChange {
    /// Interpret a raw host delta. Zero is the host's "recompute fit" signal.
    pub fn from_delta(delta: i32) -> Self {
        if delta == 0 {
            ZoomChange::Fit
        } else {
            ZoomChange::By(delta)
        }
    }
}

/// Ordered, non-empty frame sequence.
///
/// Invariants: `frames` is non-empty, `current_frame < frames.len()`,
/// `interval > 0`. Deserialization enforces them too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnimationStateData", into = "AnimationStateData")]
pub struct AnimationState {
    frames: Vec<Frame>,
    current_frame: usize,
    interval: u32,
    zoom: i32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnimationStateData {
    frames: Vec<Frame>,
    current_frame: usize,
    interval: u32,
    #[serde(default)]
    zoom: i32,
}

impl TryFrom<AnimationStateData> for AnimationState {
    type Error = AnimationError;

    fn try_from(value: AnimationStateData) -> Result<Self, Self::Error> {
        let state = Self {
            frames: value.frames,
            current_frame: value.current_frame,
            interval: value.interval,
            zoom: value.zoom,
        };
        state.validate()?;
        Ok(state)
    }
}

impl From<AnimationState> for AnimationStateData {
    fn from(value: AnimationState) -> Self {
        Self {
            frames: value.frames,
            current_frame: value.current_frame,
            interval: value.interval,
            zoom: value.zoom,
        }
    }
}

fn check_interval(interval: u32) -> Result<(), AnimationError> {
    if interval == 0 {
        return Err(AnimationError::InvalidInterval);
    }
    Ok(())
}

impl AnimationState {
    /// Build a state from frames, with the cursor on the first frame.
    pub fn new(frames: Vec<Frame>, interval: u32) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::EmptyAnimation);
        }
        check_interval(interval)?;
        Ok(Self {
            frames,
            current_frame: 0,
            interval,
            zoom: AUTO_ZOOM,
        })
    }

    /// Single transparent frame.
    pub fn blank(width: usize, height: usize, interval: u32) -> Result<Self, AnimationError> {
        Self::new(vec![Frame::blank(width, height)?], interval)
    }

    /// Check the structural invariants.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.frames.is_empty() {
            return Err(AnimationError::EmptyAnimation);
        }
        if self.current_frame >= self.frames.len() {
            return Err(AnimationError::IndexOutOfBounds {
                index: self.current_frame,
                len: self.frames.len(),
            });
        }
        check_interval(self.interval)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    pub fn current_frame(&self) -> Result<&Frame, AnimationError> {
        self.frame(self.current_frame)
    }

    pub fn frame(&self, index: usize) -> Result<&Frame, AnimationError> {
        self.frames.get(index).ok_or(AnimationError::IndexOutOfBounds {
            index,
            len: self.frames.len(),
        })
    }

    /// Rendered bitmap of the current frame.
    pub fn current_bitmap(&self) -> Result<Bitmap, AnimationError> {
        Ok(self.current_frame()?.project_to_bitmap())
    }

    /// Playback interval in milliseconds.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    /// Dimensions of the current frame.
    pub fn dimensions(&self) -> (usize, usize) {
        self.frames
            .get(self.current_frame)
            .map(Frame::dimensions)
            .unwrap_or((0, 0))
    }

    /// Replace the whole frame sequence. The cursor returns to frame 0 and
    /// zoom is kept.
    pub fn set_frames(&self, frames: Vec<Frame>, interval: u32) -> Result<Self, AnimationError> {
        let mut next = Self::new(frames, interval)?;
        next.zoom = self.zoom;
        Ok(next)
    }

    /// Replace the frame under the cursor with one wrapping `bitmap`.
    pub fn set_current_frame_bitmap(&self, bitmap: Bitmap) -> Result<Self, AnimationError> {
        let len = self.frames.len();
        let mut next = self.clone();
        let slot = next
            .frames
            .get_mut(self.current_frame)
            .ok_or(AnimationError::IndexOutOfBounds {
                index: self.current_frame,
                len,
            })?;
        *slot = Frame::new(bitmap);
        Ok(next)
    }

    /// Apply a zoom change. Explicit steps are clamped into `limits`.
    pub fn set_zoom(&self, change: ZoomChange, limits: &ZoomLimits) -> Self {
        let zoom = match change {
            ZoomChange::Fit => AUTO_ZOOM,
            ZoomChange::By(delta) => limits.clamp(self.zoom.saturating_add(delta)),
        };
        Self {
            zoom,
            ..self.clone()
        }
    }

    /// Move the cursor by `direction` frames, wrapping at both ends.
    pub fn advance_current_frame(&self, direction: i32) -> Self {
        let len = self.frames.len().max(1) as i64;
        let current_frame = (self.current_frame as i64 + direction as i64).rem_euclid(len) as usize;
        Self {
            current_frame,
            ..self.clone()
        }
    }

    /// Put the cursor on `index`.
    pub fn set_current_frame(&self, index: usize) -> Result<Self, AnimationError> {
        self.frame(index)?;
        Ok(Self {
            current_frame: index,
            ..self.clone()
        })
    }

    /// Append a transparent frame sized like the current one and select it.
    pub fn add_frame(&self) -> Result<Self, AnimationError> {
        let (width, height) = self.dimensions();
        let mut next = self.clone();
        next.frames.push(Frame::blank(width, height)?);
        next.current_frame = next.frames.len() - 1;
        Ok(next)
    }

    /// Insert a copy of frame `index` right after it and select the copy.
    pub fn duplicate_frame(&self, index: usize) -> Result<Self, AnimationError> {
        let copy = self.frame(index)?.clone();
        let mut next = self.clone();
        next.frames.insert(index + 1, copy);
        next.current_frame = index + 1;
        Ok(next)
    }

    /// Remove frame `index`. The last remaining frame cannot be removed.
    pub fn delete_frame(&self, index: usize) -> Result<Self, AnimationError> {
        self.frame(index)?;
        if self.frames.len() == 1 {
            return Err(AnimationError::EmptyAnimation);
        }
        let mut next = self.clone();
        next.frames.remove(index);
        if next.current_frame > index {
            next.current_frame -= 1;
        }
        next.current_frame = next.current_frame.min(next.frames.len() - 1);
        Ok(next)
    }

    /// Move frame `from` to position `to`. The cursor stays on the frame it
    /// was on.
    pub fn move_frame(&self, from: usize, to: usize) -> Result<Self, AnimationError> {
        self.frame(from)?;
        self.frame(to)?;
        let mut next = self.clone();
        let frame = next.frames.remove(from);
        next.frames.insert(to, frame);

        let cursor = self.current_frame;
        next.current_frame = if cursor == from {
            to
        } else if from < cursor && cursor <= to {
            cursor - 1
        } else if to <= cursor && cursor < from {
            cursor + 1
        } else {
            cursor
        };
        Ok(next)
    }

    /// Change the playback interval.
    pub fn set_interval(&self, interval: u32) -> Result<Self, AnimationError> {
        check_interval(interval)?;
        Ok(Self {
            interval,
            ..self.clone()
        })
    }

    /// Crop or pad every frame to new dimensions.
    pub fn resize(&self, width: usize, height: usize) -> Result<Self, AnimationError> {
        let frames = self
            .frames
            .iter()
            .map(|frame| {
                Ok(Frame {
                    bitmap: frame.bitmap.resized(width, height)?,
                    floating: frame.floating.clone(),
                })
            })
            .collect::<Result<Vec<_>, ShapeError>>()?;
        Ok(Self {
            frames,
            ..self.clone()
        })
    }
}
