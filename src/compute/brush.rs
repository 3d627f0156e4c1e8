//! Brush textures used as stroke alpha masks.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

use crate::error::PaintError;
use crate::schema::ConfigError;

/// File extensions tried, in order, by [`BrushSet::load_dir`].
const BRUSH_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

/// Immutable, ordered set of greyscale brush textures.
///
/// A texture's luminance is the stroke's alpha: 255 paints the stroke colour,
/// 0 leaves the canvas untouched.
#[derive(Debug, Clone)]
pub struct BrushSet {
    textures: Vec<GrayImage>,
}

impl BrushSet {
    /// Wrap already decoded textures.
    pub fn new(textures: Vec<GrayImage>) -> Self {
        Self { textures }
    }

    /// Load `0.<ext>` .. `count-1.<ext>` from `dir`, converted to luminance.
    pub fn load_dir(dir: impl AsRef<Path>, count: usize) -> Result<Self, PaintError> {
        let dir = dir.as_ref();
        let mut textures = Vec::with_capacity(count);

        for i in 0..count {
            let path = BRUSH_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}.{}", i, ext)))
                .find(|p| p.exists())
                .unwrap_or_else(|| dir.join(format!("{}.{}", i, BRUSH_EXTENSIONS[0])));

            let texture = image::open(&path)
                .map_err(|e| PaintError::image(&path, e))?
                .to_luma8();
            log::debug!(
                "Loaded brush {} from {} ({}x{})",
                i,
                path.display(),
                texture.width(),
                texture.height()
            );
            textures.push(texture);
        }

        Ok(Self { textures })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&GrayImage> {
        self.textures.get(index)
    }

    /// Check that `required` brushes exist and none exceeds `resolution`.
    pub fn validate(&self, required: usize, resolution: u32) -> Result<(), ConfigError> {
        if self.textures.len() < required {
            return Err(ConfigError::MissingBrushes {
                required,
                available: self.textures.len(),
            });
        }
        for (index, texture) in self.textures.iter().enumerate().take(required) {
            if texture.width() > resolution || texture.height() > resolution {
                return Err(ConfigError::OversizedBrush {
                    index,
                    width: texture.width(),
                    height: texture.height(),
                    resolution,
                });
            }
        }
        Ok(())
    }

    /// Alpha mask for one stroke: brush `index` scaled by `size` then rotated
    /// counter-clockwise by `rotation` degrees about its centre.
    ///
    /// The mask keeps its scaled dimensions; corners uncovered by the
    /// rotation are transparent.
    pub fn stroke_mask(&self, index: usize, size: f32, rotation: f32) -> Option<GrayImage> {
        let texture = self.textures.get(index)?;

        let width = scaled_dim(texture.width(), size);
        let height = scaled_dim(texture.height(), size);
        let scaled = imageops::resize(texture, width, height, FilterType::CatmullRom);

        let angle = rotation.rem_euclid(360.0);
        if angle == 0.0 {
            return Some(scaled);
        }
        // imageproc rotates clockwise for positive angles
        Some(rotate_about_center(
            &scaled,
            -angle.to_radians(),
            Interpolation::Bilinear,
            Luma([0]),
        ))
    }
}

/// Texture dimension after scaling, never below one pixel.
#[inline]
fn scaled_dim(dim: u32, size: f32) -> u32 {
    ((dim as f32 * size).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(side: u32) -> GrayImage {
        let c = side as f32 / 2.0;
        GrayImage::from_fn(side, side, |x, y| {
            let d = ((x as f32 + 0.5 - c).powi(2) + (y as f32 + 0.5 - c).powi(2)).sqrt();
            Luma([if d < c { 255 } else { 0 }])
        })
    }

    #[test]
    fn test_scaled_dimensions() {
        let brushes = BrushSet::new(vec![disc(20)]);

        let mask = brushes.stroke_mask(0, 0.5, 0.0).unwrap();
        assert_eq!(mask.dimensions(), (10, 10));

        let tiny = brushes.stroke_mask(0, 0.001, 0.0).unwrap();
        assert_eq!(tiny.dimensions(), (1, 1));
    }

    #[test]
    fn test_rotation_keeps_dimensions() {
        let bar = GrayImage::from_fn(16, 8, |_, y| Luma([if y < 4 { 255 } else { 0 }]));
        let brushes = BrushSet::new(vec![bar]);

        let rotated = brushes.stroke_mask(0, 1.0, 45.0).unwrap();
        assert_eq!(rotated.dimensions(), (16, 8));
    }

    #[test]
    fn test_rotation_clears_corners() {
        let brushes = BrushSet::new(vec![GrayImage::from_pixel(16, 16, Luma([255]))]);

        let rotated = brushes.stroke_mask(0, 1.0, 45.0).unwrap();
        assert_eq!(rotated.get_pixel(0, 0)[0], 0);
        assert!(rotated.get_pixel(8, 8)[0] >= 250);
    }

    #[test]
    fn test_full_turn_is_identity() {
        let brushes = BrushSet::new(vec![disc(12)]);

        let plain = brushes.stroke_mask(0, 1.0, 0.0).unwrap();
        let turned = brushes.stroke_mask(0, 1.0, 360.0).unwrap();
        assert_eq!(plain, turned);
    }

    #[test]
    fn test_unknown_brush() {
        let brushes = BrushSet::new(vec![disc(4)]);
        assert!(brushes.stroke_mask(3, 1.0, 0.0).is_none());
    }

    #[test]
    fn test_validate() {
        let brushes = BrushSet::new(vec![disc(8), disc(8), disc(12)]);

        assert!(brushes.validate(2, 8).is_ok());
        assert_eq!(
            brushes.validate(4, 16),
            Err(ConfigError::MissingBrushes {
                required: 4,
                available: 3
            })
        );
        assert!(matches!(
            brushes.validate(3, 8),
            Err(ConfigError::OversizedBrush { index: 2, .. })
        ));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        disc(10).save(dir.path().join("0.png")).unwrap();
        disc(6).save(dir.path().join("1.png")).unwrap();

        let brushes = BrushSet::load_dir(dir.path(), 2).unwrap();
        assert_eq!(brushes.len(), 2);
        assert_eq!(brushes.get(0).unwrap().dimensions(), (10, 10));
        assert_eq!(brushes.get(1).unwrap(), &disc(6));
    }

    #[test]
    fn test_load_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        disc(10).save(dir.path().join("0.png")).unwrap();

        assert!(matches!(
            BrushSet::load_dir(dir.path(), 2),
            Err(PaintError::Image { .. })
        ));
    }
}
