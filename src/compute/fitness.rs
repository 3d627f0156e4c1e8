//! Fitness: how far a rendered canvas is from the target.

use image::GrayImage;

/// Sum of absolute per-pixel differences. Lower is better, 0 is a perfect match.
///
/// Accumulates in `u64`, so 255 times any realistic pixel count fits.
pub fn absolute_error(rendered: &GrayImage, target: &GrayImage) -> u64 {
    debug_assert_eq!(rendered.dimensions(), target.dimensions());

    rendered
        .as_raw()
        .iter()
        .zip(target.as_raw())
        .map(|(&a, &b)| a.abs_diff(b) as u64)
        .sum()
}
