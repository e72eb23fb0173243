//! Configuration types for an editing session.

use serde::{Deserialize, Serialize};

/// Zoom value meaning "fit the canvas to the available space".
pub const AUTO_ZOOM: i32 = 0;

fn default_interval() -> u32 {
    100
}

fn default_dimension() -> usize {
    16
}

/// Range for explicit zoom steps, relative to the auto-fit scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomLimits {
    /// Furthest zoom-out step.
    pub min: i32,
    /// Furthest zoom-in step.
    pub max: i32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: -4, max: 10 }
    }
}

impl ZoomLimits {
    /// Clamp `zoom` into the range. Never panics, even on an inverted range.
    #[inline]
    pub fn clamp(&self, zoom: i32) -> i32 {
        zoom.max(self.min).min(self.max)
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Zoom step range.
    #[serde(default)]
    pub zoom: ZoomLimits,
    /// Maximum undo depth (`None` = unbounded). Oldest entries are evicted first.
    #[serde(default)]
    pub max_past: Option<usize>,
    /// Playback interval for new animations, in milliseconds.
    #[serde(default = "default_interval")]
    pub default_interval: u32,
    /// Width of the initial blank frame.
    #[serde(default = "default_dimension")]
    pub default_width: usize,
    /// Height of the initial blank frame.
    #[serde(default = "default_dimension")]
    pub default_height: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomLimits::default(),
            max_past: None,
            default_interval: default_interval(),
            default_width: default_dimension(),
            default_height: default_dimension(),
        }
    }
}

impl EditorConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zoom.min > AUTO_ZOOM || self.zoom.max < AUTO_ZOOM {
            return Err(ConfigError::InvalidZoomRange {
                min: self.zoom.min,
                max: self.zoom.max,
            });
        }
        if self.max_past == Some(0) {
            return Err(ConfigError::InvalidHistoryCap);
        }
        if self.default_interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.default_width == 0 || self.default_height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Zoom range [{min}, {max}] must contain the auto-fit zoom")]
    InvalidZoomRange { min: i32, max: i32 },
    #[error("History cap must be non-zero")]
    InvalidHistoryCap,
    #[error("Default interval must be positive")]
    InvalidInterval,
    #[error("Default frame dimensions must be non-zero")]
    InvalidDimensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EditorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EditorConfig {
            zoom: ZoomLimits { min: 1, max: 4 },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidZoomRange { min: 1, max: 4 })
        ));

        let config = EditorConfig {
            max_past: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidHistoryCap));

        let config = EditorConfig {
            default_interval: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidInterval));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"max_past": 50}"#).unwrap();
        assert_eq!(config.max_past, Some(50));
        assert_eq!(config.default_interval, 100);
        assert_eq!(config.zoom, ZoomLimits::default());
    }

    #[test]
    fn test_zoom_clamp() {
        let limits = ZoomLimits { min: -2, max: 3 };
        assert_eq!(limits.clamp(7), 3);
        assert_eq!(limits.clamp(-9), -2);
        assert_eq!(limits.clamp(1), 1);
    }
}
