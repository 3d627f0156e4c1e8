//! Stroke genes and genomes.

use serde::{Deserialize, Serialize};

use super::{ConfigError, PaintConfig};

/// Parameters of a single brushstroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    /// Grey level painted through the brush alpha.
    pub color: u8,
    /// Stroke centre row in canvas coordinates.
    pub pos_y: u32,
    /// Stroke centre column in canvas coordinates.
    pub pos_x: u32,
    /// Scale factor applied to the brush texture.
    pub size: f32,
    /// Counter-clockwise rotation in degrees (any value, normalized when drawn).
    pub rotation: f32,
    /// Index into the brush set.
    pub brush: usize,
}

/// Ordered strokes, painted first to last.
pub type Genome = Vec<Gene>;

/// The mutable fields of a [`Gene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneField {
    Color,
    PosY,
    PosX,
    Size,
    Rotation,
    Brush,
}

impl GeneField {
    /// All fields, in the order mutation draws pick from.
    pub const ALL: [GeneField; 6] = [
        GeneField::Color,
        GeneField::PosY,
        GeneField::PosX,
        GeneField::Size,
        GeneField::Rotation,
        GeneField::Brush,
    ];
}

impl Gene {
    /// Rotation folded into [0, 360).
    #[inline]
    pub fn normalized_rotation(&self) -> f32 {
        self.rotation.rem_euclid(360.0)
    }

    /// Check every field against the configured domain for a
    /// `width` x `height` canvas.
    pub fn validate(
        &self,
        index: usize,
        config: &PaintConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ConfigError> {
        let out = |reason: String| ConfigError::GeneOutOfDomain { index, reason };

        if self.pos_y >= height || self.pos_x >= width {
            return Err(out(format!(
                "position ({}, {}) outside {}x{} canvas",
                self.pos_y, self.pos_x, width, height
            )));
        }
        if !(config.min_size..=config.max_size).contains(&self.size) {
            return Err(out(format!(
                "size {} outside {}..={}",
                self.size, config.min_size, config.max_size
            )));
        }
        if !self.rotation.is_finite() {
            return Err(out(format!("rotation {} is not finite", self.rotation)));
        }
        let (first, end) = config.brush_range();
        if self.brush < first || self.brush >= end {
            return Err(out(format!("brush {} outside {}..{}", self.brush, first, end)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene() -> Gene {
        Gene {
            color: 128,
            pos_y: 3,
            pos_x: 4,
            size: 0.2,
            rotation: -90.0,
            brush: 1,
        }
    }

    #[test]
    fn test_normalized_rotation() {
        assert_eq!(gene().normalized_rotation(), 270.0);
        let g = Gene {
            rotation: 720.0,
            ..gene()
        };
        assert_eq!(g.normalized_rotation(), 0.0);
    }

    #[test]
    fn test_validate_in_domain() {
        let config = PaintConfig::default();
        assert!(gene().validate(0, &config, 10, 10).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_domain() {
        let config = PaintConfig::default();

        let reserved = Gene { brush: 0, ..gene() };
        assert!(reserved.validate(0, &config, 10, 10).is_err());

        let outside = Gene { pos_x: 10, ..gene() };
        assert!(outside.validate(0, &config, 10, 10).is_err());

        let huge = Gene { size: 0.9, ..gene() };
        match huge.validate(7, &config, 10, 10) {
            Err(ConfigError::GeneOutOfDomain { index, .. }) => assert_eq!(index, 7),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_genome_json() {
        let genome: Genome = vec![gene(), Gene { color: 0, ..gene() }];
        let json = serde_json::to_string(&genome).unwrap();
        let back: Genome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, genome);
    }
}
