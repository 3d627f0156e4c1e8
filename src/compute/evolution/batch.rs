//! Independent runs over a shared scene.

use std::sync::Arc;

use rayon::prelude::*;

use super::Painter;
use crate::compute::Scene;
use crate::error::PaintError;

/// Seed for pass `pass` of the run started with `run_seed`.
#[inline]
pub fn pass_seed(run_seed: u64, pass: usize) -> u64 {
    run_seed.wrapping_add(pass as u64 + 1)
}

/// Initialize one painter per seed and evolve each for `passes` passes.
///
/// Runs share only the read-only scene, so they proceed in parallel. Each
/// run is itself sequential. Results come back in seed order.
pub fn evolve_independent(
    scene: &Arc<Scene>,
    seeds: &[u64],
    stroke_count: usize,
    passes: usize,
) -> Result<Vec<Painter>, PaintError> {
    seeds
        .par_iter()
        .map(|&seed| {
            let mut painter = Painter::init_genome(Arc::clone(scene), stroke_count, seed)?;
            for pass in 0..passes {
                painter.evolve_once(pass_seed(seed, pass))?;
            }
            Ok(painter)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::BrushSet;
    use crate::schema::PaintConfig;
    use image::{GrayImage, Luma};

    fn scene() -> Arc<Scene> {
        let config = PaintConfig {
            min_size: 0.5,
            max_size: 1.0,
            max_brush_number: 2,
            brush_resolution: 6,
            ..Default::default()
        };
        let target = GrayImage::from_fn(16, 16, |x, y| Luma([((x ^ y) * 16) as u8]));
        let brushes = BrushSet::new(vec![GrayImage::from_pixel(6, 6, Luma([255])); 2]);
        Arc::new(Scene::from_target(config, target, brushes).unwrap())
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scene = scene();
        let seeds = [3, 14, 15, 92];

        let parallel = evolve_independent(&scene, &seeds, 4, 3).unwrap();
        assert_eq!(parallel.len(), seeds.len());

        for (painter, &seed) in parallel.iter().zip(&seeds) {
            let mut alone = Painter::init_genome(Arc::clone(&scene), 4, seed).unwrap();
            for pass in 0..3 {
                alone.evolve_once(pass_seed(seed, pass)).unwrap();
            }
            assert_eq!(painter.genome(), alone.genome());
            assert_eq!(painter.error(), alone.error());
        }
    }

    #[test]
    fn test_pass_seeds_differ() {
        assert_ne!(pass_seed(0, 0), pass_seed(0, 1));
        assert_eq!(pass_seed(u64::MAX, 0), 0);
    }
}
