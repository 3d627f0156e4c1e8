//! Stroke compositing.
//!
//! Strokes are alpha-blended one after another onto a zero-padded copy of
//! the base canvas. The padding is wide enough for the largest configured
//! stroke centred on any canvas pixel, so a stroke that still falls outside
//! it means the gene and the configuration disagree.

use image::{GrayImage, imageops};

use super::BrushSet;
use crate::error::PaintError;
use crate::schema::{ConfigError, Gene};

/// Renders genomes onto a base canvas.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    brushes: &'a BrushSet,
    canvas: Option<&'a GrayImage>,
    width: u32,
    height: u32,
    padding: u32,
}

impl<'a> Renderer<'a> {
    /// Renderer over a `width` x `height` canvas. Without a base canvas,
    /// strokes are painted onto black.
    pub fn new(
        brushes: &'a BrushSet,
        canvas: Option<&'a GrayImage>,
        width: u32,
        height: u32,
        padding: u32,
    ) -> Self {
        Self {
            brushes,
            canvas,
            width,
            height,
            padding,
        }
    }

    #[inline]
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Render `genes` in order and return the unpadded result.
    pub fn render(&self, genes: &[Gene]) -> Result<GrayImage, PaintError> {
        let mut padded = self.padded_base();
        for (index, gene) in genes.iter().enumerate() {
            self.paint(&mut padded, index, gene)?;
        }
        Ok(self.unpad(&padded))
    }

    /// Base canvas (or black) surrounded by the zero border.
    pub fn padded_base(&self) -> GrayImage {
        let p = self.padding;
        let mut padded = GrayImage::new(self.width + 2 * p, self.height + 2 * p);
        if let Some(canvas) = self.canvas {
            imageops::replace(&mut padded, canvas, p as i64, p as i64);
        }
        padded
    }

    /// Strip the zero border.
    pub fn unpad(&self, padded: &GrayImage) -> GrayImage {
        let p = self.padding;
        imageops::crop_imm(padded, p, p, self.width, self.height).to_image()
    }

    /// Composite one stroke onto a padded buffer.
    ///
    /// `index` only labels the stroke in errors. Nothing is written when the
    /// stroke does not fit.
    pub fn paint(
        &self,
        padded: &mut GrayImage,
        index: usize,
        gene: &Gene,
    ) -> Result<(), PaintError> {
        let mask = self
            .brushes
            .stroke_mask(gene.brush, gene.size, gene.rotation)
            .ok_or_else(|| ConfigError::GeneOutOfDomain {
                index,
                reason: format!("brush {} not loaded", gene.brush),
            })?;
        let (cols, rows) = mask.dimensions();

        let center_y = (gene.pos_y + self.padding) as f64;
        let center_x = (gene.pos_x + self.padding) as f64;
        let top = (center_y - rows as f64 / 2.0) as i64;
        let left = (center_x - cols as f64 / 2.0) as i64;

        let (width, height) = padded.dimensions();
        if top < 0
            || left < 0
            || top + rows as i64 > height as i64
            || left + cols as i64 > width as i64
        {
            return Err(PaintError::RenderBounds {
                gene: index,
                top,
                left,
                rows,
                cols,
                width,
                height,
            });
        }

        let color = gene.color as f32;
        let (top, left) = (top as u32, left as u32);
        for (x, y, alpha) in mask.enumerate_pixels() {
            let a = alpha[0] as f32 / 255.0;
            let dst = padded.get_pixel_mut(left + x, top + y);
            let blended = a * color + (1.0 - a) * dst[0] as f32;
            dst[0] = blended.clamp(0.0, 255.0) as u8;
        }

        Ok(())
    }
}
