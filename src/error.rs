//! Error types shared by the renderer and the mutation engine.

use std::path::PathBuf;

use crate::schema::ConfigError;

/// Errors raised while setting up or running a painting.
#[derive(Debug, thiserror::Error)]
pub enum PaintError {
    /// Rejected inputs, detected before any rendering happens.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// A stroke landed outside the padded canvas. The padding no longer
    /// matches the stroke sizes, so the render is aborted.
    #[error(
        "Stroke {gene} ({rows}x{cols} at row {top}, col {left}) falls outside the {width}x{height} padded canvas"
    )]
    RenderBounds {
        gene: usize,
        top: i64,
        left: i64,
        rows: u32,
        cols: u32,
        width: u32,
        height: u32,
    },
    #[error("Image error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PaintError {
    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}
