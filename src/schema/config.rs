//! Configuration types for brushstroke evolution parameters.

use serde::{Deserialize, Serialize};

fn default_padding_margin() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

/// Top-level painting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintConfig {
    /// Smallest scale factor applied to a brush texture.
    pub min_size: f32,
    /// Largest scale factor applied to a brush texture.
    pub max_size: f32,
    /// Number of brush textures in use (brush indices stay below this).
    pub max_brush_number: usize,
    /// Side length in pixels of the (square) brush textures.
    pub brush_resolution: u32,
    /// Number of strokes in a genome.
    pub stroke_count: usize,
    /// Extra zero border added on top of the half maximum stroke size.
    #[serde(default = "default_padding_margin")]
    pub padding_margin: u32,
    /// Never draw brush 0 when generating or mutating strokes.
    #[serde(default = "default_true")]
    pub skip_first_brush: bool,
    /// Reuse the composited prefix while mutating instead of re-rendering
    /// every stroke for each candidate.
    #[serde(default = "default_true")]
    pub incremental: bool,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            min_size: 0.1,
            max_size: 0.3,
            max_brush_number: 4,
            brush_resolution: 300,
            stroke_count: 10,
            padding_margin: default_padding_margin(),
            skip_first_brush: true,
            incremental: true,
            random_seed: None,
        }
    }
}

impl PaintConfig {
    /// Zero border added around the canvas while compositing.
    ///
    /// Half of the largest possible stroke plus the margin, so a stroke
    /// centred on any canvas pixel stays inside the padded buffer.
    #[inline]
    pub fn padding(&self) -> u32 {
        (self.brush_resolution as f32 * self.max_size / 2.0) as u32 + self.padding_margin
    }

    /// Half-open range of brush indices used for new strokes.
    #[inline]
    pub fn brush_range(&self) -> (usize, usize) {
        let first = if self.skip_first_brush { 1 } else { 0 };
        (first, self.max_brush_number)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size.is_nan() || self.min_size <= 0.0 || !self.max_size.is_finite() {
            return Err(ConfigError::NonPositiveSize {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::EmptySizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.brush_resolution == 0 {
            return Err(ConfigError::InvalidBrushResolution);
        }
        let (first, end) = self.brush_range();
        if first >= end {
            return Err(ConfigError::EmptyBrushRange { first, end });
        }
        if self.stroke_count == 0 {
            return Err(ConfigError::InvalidStrokeCount);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Stroke sizes must be positive and finite (got {min}..{max})")]
    NonPositiveSize { min: f32, max: f32 },
    #[error("Minimum stroke size {min} exceeds maximum {max}")]
    EmptySizeRange { min: f32, max: f32 },
    #[error("Brush resolution must be non-zero")]
    InvalidBrushResolution,
    #[error("Brush index range {first}..{end} is empty")]
    EmptyBrushRange { first: usize, end: usize },
    #[error("Configured stroke count must be non-zero")]
    InvalidStrokeCount,
    #[error("{required} brushes are configured but only {available} were loaded")]
    MissingBrushes { required: usize, available: usize },
    #[error("Brush {index} is {width}x{height}, larger than the {resolution}px brush resolution")]
    OversizedBrush {
        index: usize,
        width: u32,
        height: u32,
        resolution: u32,
    },
    #[error("Target image must be non-empty")]
    EmptyTarget,
    #[error("Sampling mask has no positive, finite weight to sample from")]
    DegenerateSamplingMask,
    #[error("{what} is {actual_width}x{actual_height}, expected {width}x{height}")]
    ShapeMismatch {
        what: &'static str,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
    #[error("Stroke {index} is outside its domain: {reason}")]
    GeneOutOfDomain { index: usize, reason: String },
}
