//! Crop modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape constraint applied to the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    /// Free-floating square; width always equals height.
    #[default]
    Square,
    /// Locked to the view's width/height ratio.
    ScreenRatio,
    /// The whole image; no crop rectangle interaction.
    FullScreen,
}

impl CropMode {
    pub const ALL: [CropMode; 3] = [CropMode::Square, CropMode::ScreenRatio, CropMode::FullScreen];

    /// Whether the corner handles are active in this mode.
    pub fn resizable(self) -> bool {
        !matches!(self, CropMode::FullScreen)
    }

    /// Target width/height ratio, or `None` when unconstrained.
    pub fn aspect_ratio(self, view_width: f64, view_height: f64) -> Option<f64> {
        match self {
            CropMode::Square => Some(1.0),
            CropMode::ScreenRatio => {
                let ratio = view_width / view_height;
                (ratio.is_finite() && ratio > 0.0).then_some(ratio)
            }
            CropMode::FullScreen => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CropMode::Square => "square",
            CropMode::ScreenRatio => "screen_ratio",
            CropMode::FullScreen => "full_screen",
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no crop mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown crop mode: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for CropMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        CropMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resizable() {
        assert!(CropMode::Square.resizable());
        assert!(CropMode::ScreenRatio.resizable());
        assert!(!CropMode::FullScreen.resizable());
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(CropMode::Square.aspect_ratio(1080.0, 1920.0), Some(1.0));
        assert_eq!(CropMode::ScreenRatio.aspect_ratio(1000.0, 500.0), Some(2.0));
        assert_eq!(CropMode::ScreenRatio.aspect_ratio(0.0, 0.0), None);
        assert_eq!(CropMode::FullScreen.aspect_ratio(1000.0, 500.0), None);
    }

    #[test]
    fn test_parse_round_trip() {
        for mode in CropMode::ALL {
            assert_eq!(mode.to_string().parse::<CropMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_parse_lenient_spelling() {
        assert_eq!("SCREEN_RATIO".parse(), Ok(CropMode::ScreenRatio));
        assert_eq!(" full-screen ".parse(), Ok(CropMode::FullScreen));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "circle".parse::<CropMode>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown crop mode: circle");
    }

    #[test]
    fn test_default_is_square() {
        assert_eq!(CropMode::default(), CropMode::Square);
    }
}
