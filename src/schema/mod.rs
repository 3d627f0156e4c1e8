//! Schema module - Configuration and stroke types for brushstroke evolution.

mod config;
mod gene;

pub use config::*;
pub use gene::*;
