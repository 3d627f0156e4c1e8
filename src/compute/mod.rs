//! Compute module - Rendering, scoring and evolution of brushstrokes.

mod brush;
mod field;
mod fitness;
mod render;
mod sampler;
mod scene;

pub mod evolution;

pub use brush::*;
pub use field::*;
pub use fitness::*;
pub use render::*;
pub use sampler::*;
pub use scene::*;
