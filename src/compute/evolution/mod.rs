//! Greedy evolution of brushstroke genomes.
//!
//! # Overview
//!
//! - **Streams** (`rng`): seeded random draws keyed by seed, stroke and draw index
//! - **Painter** (`painter`): genome plus render cache, one mutation attempt per stroke per pass
//! - **Batches** (`batch`): independent runs sharing a scene, in parallel
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use genetic_brush::compute::evolution::Painter;
//! use genetic_brush::compute::{BrushSet, Scene};
//! use genetic_brush::schema::PaintConfig;
//!
//! # fn main() -> Result<(), genetic_brush::PaintError> {
//! let target = genetic_brush::io::load_target("target.jpg", 1024)?;
//! let brushes = BrushSet::load_dir("brushes/watercolor", 4)?;
//! let scene = Arc::new(Scene::from_target(PaintConfig::default(), target, brushes)?);
//!
//! let mut painter = Painter::init_genome(scene, 10, 0)?;
//! for pass in 0..20 {
//!     let report = painter.evolve_once(pass)?;
//!     println!("Pass {}: error = {}", pass, report.error);
//! }
//! # Ok(())
//! # }
//! ```

mod batch;
mod painter;
mod rng;

pub use batch::{evolve_independent, pass_seed};
pub use painter::{Painter, PassReport};
pub use rng::{StrokeDomain, StrokeRng, select_fields};
