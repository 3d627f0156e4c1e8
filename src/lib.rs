//! Genetic Brush - Greedy brushstroke evolution towards a target image.
//!
//! A target greyscale image is approximated by an ordered list of brush
//! strokes. Each pass proposes a random change to every stroke in turn and
//! keeps it only if the rendered canvas gets strictly closer to the target,
//! so the error never increases.
//!
//! # Architecture
//!
//! - `schema`: Configuration, stroke genes and validation errors
//! - `compute`: Brushes, gradient field, sampling, rendering, fitness and evolution
//! - `io`: Loading targets and masks, saving results
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use genetic_brush::{BrushSet, PaintConfig, Painter, Scene};
//!
//! # fn main() -> Result<(), genetic_brush::PaintError> {
//! let config = PaintConfig::default();
//! let target = genetic_brush::io::load_target("target.jpg", 1024)?;
//! let brushes = BrushSet::load_dir("brushes/watercolor", config.max_brush_number)?;
//! let scene = Arc::new(Scene::from_target(config, target, brushes)?);
//!
//! let mut painter = Painter::init_genome(scene, 10, 42)?;
//! for pass in 0..100 {
//!     painter.evolve_once(pass)?;
//! }
//!
//! println!("Error after 100 passes: {}", painter.error());
//! genetic_brush::io::save_image(painter.image(), "painting.png")?;
//! # Ok(())
//! # }
//! ```

pub mod compute;
pub mod error;
pub mod io;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{Painter, PassReport};
pub use compute::{BrushSet, GradientField, Scene};
pub use error::PaintError;
pub use schema::{Gene, Genome, PaintConfig};
