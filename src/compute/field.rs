//! Scalar fields over the canvas and the target's gradient field.
//!
//! The gradient field biases stroke orientation: strokes on strong edges
//! follow the edge, strokes on flat areas get a random direction.

use image::GrayImage;
use rand::Rng;

use crate::schema::ConfigError;

/// Sobel filter kernels for gradient computation.
const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Row-major 2D grid of `f32` values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ScalarField {
    /// Wrap row-major data. Returns `None` if the length does not match.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Field with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Build a field by evaluating `f(row, col)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(y, x));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Grey levels of an image as weights in [0, 255].
    pub fn from_luma(image: &GrayImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().iter().map(|&v| v as f32).collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, row: u32, col: u32) -> f32 {
        self.data[row as usize * self.width as usize + col as usize]
    }

    /// Fail unless the field is `width` x `height`.
    pub(crate) fn expect_shape(
        &self,
        what: &'static str,
        width: u32,
        height: u32,
    ) -> Result<(), ConfigError> {
        if self.width == width && self.height == height {
            Ok(())
        } else {
            Err(ConfigError::ShapeMismatch {
                what,
                width,
                height,
                actual_width: self.width,
                actual_height: self.height,
            })
        }
    }
}

/// Per-pixel edge magnitude (in [0, 1]) and edge angle (degrees) of a target.
#[derive(Debug, Clone)]
pub struct GradientField {
    magnitude: ScalarField,
    angle: ScalarField,
}

impl GradientField {
    /// Pair externally computed magnitude and angle fields.
    pub fn new(magnitude: ScalarField, angle: ScalarField) -> Result<Self, ConfigError> {
        angle.expect_shape("Gradient angle field", magnitude.width, magnitude.height)?;
        Ok(Self { magnitude, angle })
    }

    /// Flat field: zero magnitude and zero angle everywhere.
    pub fn flat(width: u32, height: u32) -> Self {
        Self {
            magnitude: ScalarField::filled(width, height, 0.0),
            angle: ScalarField::filled(width, height, 0.0),
        }
    }

    /// Sobel gradient of an image.
    ///
    /// Magnitude is normalized by its maximum, angle is `atan2(gy, gx)` in
    /// degrees folded into [0, 360).
    pub fn from_image(image: &GrayImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let grid: Vec<f32> = image.as_raw().iter().map(|&v| v as f32 / 255.0).collect();

        let (grad_x, grad_y) = sobel_gradient(&grid, width, height);

        let mut magnitude = gradient_magnitude(&grad_x, &grad_y);
        let peak = magnitude.iter().copied().fold(0.0f32, f32::max);
        if peak > 0.0 {
            for m in &mut magnitude {
                *m /= peak;
            }
        }

        let angle: Vec<f32> = grad_x
            .iter()
            .zip(grad_y.iter())
            .map(|(&gx, &gy)| gy.atan2(gx).to_degrees().rem_euclid(360.0))
            .collect();

        let (w, h) = (image.width(), image.height());
        Self {
            magnitude: ScalarField {
                width: w,
                height: h,
                data: magnitude,
            },
            angle: ScalarField {
                width: w,
                height: h,
                data: angle,
            },
        }
    }

    #[inline]
    pub fn magnitude(&self) -> &ScalarField {
        &self.magnitude
    }

    #[inline]
    pub fn angle(&self) -> &ScalarField {
        &self.angle
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.magnitude.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.magnitude.height
    }

    /// Draw a stroke rotation at `(row, col)`.
    ///
    /// Strong edges pull the stroke towards the edge normal (`angle + 90`),
    /// flat regions leave the direction close to uniform in [-180, 180).
    pub fn biased_rotation<R: Rng + ?Sized>(&self, row: u32, col: u32, rng: &mut R) -> f32 {
        let magnitude = self.magnitude.get(row, col).clamp(0.0, 1.0);
        let normal = self.angle.get(row, col) + 90.0;
        rng.gen_range(-180.0f32..180.0) * (1.0 - magnitude) + normal
    }
}

/// Compute gradient of a 2D grid using Sobel filters.
/// Returns (gradient_x, gradient_y) as flat vectors.
///
/// Edge pixels reuse the nearest row/column (clamped boundary).
pub fn sobel_gradient(grid: &[f32], width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let mut grad_x = vec![0.0f32; width * height];
    let mut grad_y = vec![0.0f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let sx = (x + kx).saturating_sub(1).min(width - 1);
                    let sy = (y + ky).saturating_sub(1).min(height - 1);
                    let val = grid[sy * width + sx];

                    gx += SOBEL_X[ky][kx] * val;
                    gy += SOBEL_Y[ky][kx] * val;
                }
            }

            grad_x[y * width + x] = gx * 0.125;
            grad_y[y * width + x] = gy * 0.125;
        }
    }

    (grad_x, grad_y)
}

/// Compute gradient magnitude from gradient components.
pub fn gradient_magnitude(grad_x: &[f32], grad_y: &[f32]) -> Vec<f32> {
    grad_x
        .iter()
        .zip(grad_y.iter())
        .map(|(&gx, &gy)| (gx * gx + gy * gy).sqrt())
        .collect()
}
