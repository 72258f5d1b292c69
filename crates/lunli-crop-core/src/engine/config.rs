//! Tunable limits for the crop engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`CropConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A field that must be strictly positive is zero, negative or non-finite.
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// A field that may be zero is negative or non-finite.
    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("min_scale ({min}) must not exceed max_scale ({max})")]
    InvertedScaleRange { min: f64, max: f64 },

    #[error("max_crop_size ({max}) must not be smaller than min_crop_size ({min})")]
    InvertedSizeRange { min: f64, max: f64 },

    #[error("default_crop_fraction must be in (0, 1], got {0}")]
    CropFraction(f64),

    #[error("jpeg_quality must be between 1 and 100, got {0}")]
    JpegQuality(u8),
}

/// Crop engine configuration.
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Smallest allowed display scale.
    pub min_scale: f64,
    /// Largest allowed display scale.
    pub max_scale: f64,
    /// Pan bound per axis, as a fraction of the view extent times the
    /// current scale.
    pub pan_bound_factor: f64,
    /// Minimum crop width/height in view pixels.
    pub min_crop_size: f64,
    /// Maximum crop width/height in view pixels. The view size always
    /// bounds the crop rectangle, even when this is `None`.
    pub max_crop_size: Option<f64>,
    /// Distance (per axis) within which a touch grabs a corner handle.
    pub corner_threshold: f64,
    /// Default crop extent relative to the view.
    pub default_crop_fraction: f64,
    /// Quality used when encoding crop results to JPEG.
    pub jpeg_quality: u8,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            pan_bound_factor: 0.5,
            min_crop_size: 100.0,
            max_crop_size: None,
            corner_threshold: 50.0,
            default_crop_fraction: 0.7,
            jpeg_quality: 90,
        }
    }
}

impl CropConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_scale", self.min_scale)?;
        positive("max_scale", self.max_scale)?;
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }

        non_negative("pan_bound_factor", self.pan_bound_factor)?;
        positive("min_crop_size", self.min_crop_size)?;
        if let Some(max) = self.max_crop_size {
            positive("max_crop_size", max)?;
            if max < self.min_crop_size {
                return Err(ConfigError::InvertedSizeRange {
                    min: self.min_crop_size,
                    max,
                });
            }
        }
        non_negative("corner_threshold", self.corner_threshold)?;

        let fraction = self.default_crop_fraction;
        if !(fraction.is_finite() && fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::CropFraction(fraction));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::JpegQuality(self.jpeg_quality));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
