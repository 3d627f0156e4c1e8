//! Stroke position sampling, uniform or weighted by a sampling mask.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use super::ScalarField;
use crate::schema::ConfigError;

/// Draws stroke centres inside the canvas.
#[derive(Debug, Clone)]
pub enum PositionSampler {
    /// Every pixel equally likely.
    Uniform { width: u32, height: u32 },
    /// Pixels drawn proportionally to a weight map.
    Weighted {
        width: u32,
        height: u32,
        index: WeightedIndex<f64>,
    },
}

impl PositionSampler {
    /// Uniform sampler over a `width` x `height` canvas.
    pub fn uniform(width: u32, height: u32) -> Self {
        Self::Uniform { width, height }
    }

    /// Sampler weighted by `mask`, flattened row-major.
    ///
    /// The mask must contain at least one positive weight and no negative
    /// or non-finite ones.
    pub fn weighted(mask: &ScalarField) -> Result<Self, ConfigError> {
        if mask.data().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::DegenerateSamplingMask);
        }
        // Cumulative weights in f64: f32 totals stall past 2^24 and overflow
        let index = WeightedIndex::new(mask.data().iter().map(|&w| w as f64))
            .map_err(|_| ConfigError::DegenerateSamplingMask)?;
        Ok(Self::Weighted {
            width: mask.width(),
            height: mask.height(),
            index,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        match self {
            Self::Uniform { width, .. } | Self::Weighted { width, .. } => *width,
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        match self {
            Self::Uniform { height, .. } | Self::Weighted { height, .. } => *height,
        }
    }

    /// Draw one `(row, col)` position.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (u32, u32) {
        match self {
            Self::Uniform { width, height } => {
                let row = rng.gen_range(0..*height);
                let col = rng.gen_range(0..*width);
                (row, col)
            }
            Self::Weighted { width, index, .. } => {
                let flat = index.sample(rng) as u32;
                (flat / width, flat % width)
            }
        }
    }
}
