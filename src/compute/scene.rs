//! Immutable inputs shared by every painting run.

use image::GrayImage;

use super::evolution::StrokeDomain;
use super::{BrushSet, GradientField, PositionSampler, Renderer, ScalarField};
use crate::error::PaintError;
use crate::schema::{ConfigError, PaintConfig};

/// Everything a run reads but never writes: configuration, target image,
/// gradient field, brushes, optional base canvas and the position sampler.
///
/// A `Scene` is validated once when built and can then be shared between
/// runs behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Scene {
    config: PaintConfig,
    target: GrayImage,
    gradient: GradientField,
    brushes: BrushSet,
    canvas: Option<GrayImage>,
    sampler: PositionSampler,
}

impl Scene {
    /// Validate and assemble a scene with uniform stroke placement and a
    /// black base canvas.
    pub fn new(
        config: PaintConfig,
        target: GrayImage,
        gradient: GradientField,
        brushes: BrushSet,
    ) -> Result<Self, PaintError> {
        config.validate()?;

        let (width, height) = target.dimensions();
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyTarget.into());
        }
        gradient.magnitude().expect_shape("Gradient field", width, height)?;
        brushes.validate(config.max_brush_number, config.brush_resolution)?;

        Ok(Self {
            config,
            target,
            gradient,
            brushes,
            canvas: None,
            sampler: PositionSampler::uniform(width, height),
        })
    }

    /// Like [`Scene::new`], with the gradient field computed from the target.
    pub fn from_target(
        config: PaintConfig,
        target: GrayImage,
        brushes: BrushSet,
    ) -> Result<Self, PaintError> {
        let gradient = GradientField::from_image(&target);
        Self::new(config, target, gradient, brushes)
    }

    /// Paint over a pre-painted canvas instead of black.
    pub fn with_canvas(mut self, canvas: GrayImage) -> Result<Self, PaintError> {
        let (width, height) = self.target.dimensions();
        if canvas.dimensions() != (width, height) {
            return Err(ConfigError::ShapeMismatch {
                what: "Base canvas",
                width,
                height,
                actual_width: canvas.width(),
                actual_height: canvas.height(),
            }
            .into());
        }
        self.canvas = Some(canvas);
        Ok(self)
    }

    /// Place strokes proportionally to `mask` instead of uniformly.
    pub fn with_sampling_mask(mut self, mask: &ScalarField) -> Result<Self, PaintError> {
        let (width, height) = self.target.dimensions();
        mask.expect_shape("Sampling mask", width, height)?;
        self.sampler = PositionSampler::weighted(mask)?;
        Ok(self)
    }

    #[inline]
    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    #[inline]
    pub fn target(&self) -> &GrayImage {
        &self.target
    }

    #[inline]
    pub fn gradient(&self) -> &GradientField {
        &self.gradient
    }

    #[inline]
    pub fn brushes(&self) -> &BrushSet {
        &self.brushes
    }

    #[inline]
    pub fn canvas(&self) -> Option<&GrayImage> {
        self.canvas.as_ref()
    }

    #[inline]
    pub fn sampler(&self) -> &PositionSampler {
        &self.sampler
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Renderer over this scene's canvas and brushes.
    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(
            &self.brushes,
            self.canvas.as_ref(),
            self.width(),
            self.height(),
            self.config.padding(),
        )
    }

    /// Value domain for generating and mutating strokes.
    pub fn domain(&self) -> StrokeDomain<'_> {
        StrokeDomain {
            config: &self.config,
            sampler: &self.sampler,
            gradient: &self.gradient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn config() -> PaintConfig {
        PaintConfig {
            min_size: 0.5,
            max_size: 1.0,
            max_brush_number: 2,
            brush_resolution: 8,
            ..Default::default()
        }
    }

    fn brushes(count: usize) -> BrushSet {
        BrushSet::new(vec![GrayImage::from_pixel(8, 8, Luma([255])); count])
    }

    #[test]
    fn test_valid_scene() {
        let scene = Scene::from_target(config(), GrayImage::new(16, 12), brushes(2)).unwrap();
        assert_eq!((scene.width(), scene.height()), (16, 12));
        assert!(scene.canvas().is_none());
        assert!(matches!(scene.sampler(), PositionSampler::Uniform { .. }));
        assert_eq!(scene.renderer().padding(), 9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = PaintConfig {
            min_size: 2.0,
            ..config()
        };
        assert!(matches!(
            Scene::from_target(bad, GrayImage::new(16, 12), brushes(2)),
            Err(PaintError::InvalidConfiguration(ConfigError::EmptySizeRange { .. }))
        ));
    }

    #[test]
    fn test_missing_brushes_rejected() {
        assert!(matches!(
            Scene::from_target(config(), GrayImage::new(16, 12), brushes(1)),
            Err(PaintError::InvalidConfiguration(ConfigError::MissingBrushes { .. }))
        ));
    }

    #[test]
    fn test_empty_target_rejected() {
        assert!(matches!(
            Scene::from_target(config(), GrayImage::new(0, 12), brushes(2)),
            Err(PaintError::InvalidConfiguration(ConfigError::EmptyTarget))
        ));
    }

    #[test]
    fn test_gradient_shape_checked() {
        let result = Scene::new(
            config(),
            GrayImage::new(16, 12),
            GradientField::flat(12, 16),
            brushes(2),
        );
        assert!(matches!(
            result,
            Err(PaintError::InvalidConfiguration(ConfigError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_canvas_and_mask_shapes_checked() {
        let scene = Scene::from_target(config(), GrayImage::new(16, 12), brushes(2)).unwrap();

        assert!(scene.clone().with_canvas(GrayImage::new(12, 16)).is_err());
        assert!(
            scene
                .clone()
                .with_sampling_mask(&ScalarField::filled(16, 11, 1.0))
                .is_err()
        );

        let zeros = ScalarField::filled(16, 12, 0.0);
        assert!(matches!(
            scene.clone().with_sampling_mask(&zeros),
            Err(PaintError::InvalidConfiguration(ConfigError::DegenerateSamplingMask))
        ));

        let ok = scene
            .with_canvas(GrayImage::new(16, 12))
            .unwrap()
            .with_sampling_mask(&ScalarField::filled(16, 12, 1.0))
            .unwrap();
        assert!(ok.canvas().is_some());
        assert!(matches!(ok.sampler(), PositionSampler::Weighted { .. }));
    }
}
