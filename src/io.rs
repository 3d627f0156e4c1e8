//! Image loading and saving around the core.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};

use crate::compute::ScalarField;
use crate::error::PaintError;

/// Longest side targets are shrunk to by default.
pub const DEFAULT_MAX_SIDE: u32 = 1024;

/// Greyscale copy of `image`, shrunk so its longest side is at most `max_side`.
pub fn prepare_target(image: &DynamicImage, max_side: u32) -> GrayImage {
    let grey = image.to_luma8();
    let (width, height) = grey.dimensions();
    if width.max(height) <= max_side {
        return grey;
    }

    let ratio = (max_side as f32 / height as f32).min(max_side as f32 / width as f32);
    let new_width = ((width as f32 * ratio) as u32).max(1);
    let new_height = ((height as f32 * ratio) as u32).max(1);
    image::imageops::resize(&grey, new_width, new_height, FilterType::CatmullRom)
}

/// Load a target image as greyscale, see [`prepare_target`].
pub fn load_target(path: impl AsRef<Path>, max_side: u32) -> Result<GrayImage, PaintError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| PaintError::image(path, e))?;
    Ok(prepare_target(&image, max_side))
}

/// Load a greyscale image as stroke placement weights.
pub fn load_mask(path: impl AsRef<Path>) -> Result<ScalarField, PaintError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| PaintError::image(path, e))?;
    Ok(ScalarField::from_luma(&image.to_luma8()))
}

/// Save a rendered canvas, format chosen from the extension.
pub fn save_image(image: &GrayImage, path: impl AsRef<Path>) -> Result<(), PaintError> {
    let path = path.as_ref();
    image.save(path).map_err(|e| PaintError::image(path, e))
}
