//! Quick evolution performance test

use std::sync::Arc;
use std::time::Instant;

use genetic_brush::{
    BrushSet, PaintConfig, Painter, Scene,
    compute::evolution::{evolve_independent, pass_seed},
};
use image::{GrayImage, Luma};

const BRUSH_SIDE: u32 = 48;

fn brushes() -> BrushSet {
    let c = BRUSH_SIDE as f32 / 2.0;
    let soft = GrayImage::from_fn(BRUSH_SIDE, BRUSH_SIDE, |x, y| {
        let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2) * 4.0).sqrt() / c;
        Luma([(255.0 * (1.0 - d).clamp(0.0, 1.0)) as u8])
    });
    BrushSet::new(vec![soft.clone(), soft.clone(), soft])
}

fn scene(size: u32, incremental: bool) -> Arc<Scene> {
    let config = PaintConfig {
        min_size: 0.3,
        max_size: 1.0,
        max_brush_number: 3,
        brush_resolution: BRUSH_SIDE,
        incremental,
        ..Default::default()
    };
    let half = size as f32 / 2.0;
    let target = GrayImage::from_fn(size, size, |x, y| {
        let r = ((x as f32 - half).powi(2) + (y as f32 - half).powi(2)).sqrt();
        Luma([if r < half * 0.6 { 220 } else { (y * 255 / size) as u8 }])
    });
    Arc::new(Scene::from_target(config, target, brushes()).unwrap())
}

fn main() {
    println!("=== Evolution Performance Test ===\n");

    // Test different canvas sizes
    for size in [64, 128, 256] {
        println!("Canvas size: {}x{}", size, size);

        for incremental in [false, true] {
            let start = Instant::now();
            let mut painter = Painter::init_genome(scene(size, incremental), 40, 42).unwrap();
            let initial = painter.error();

            let mut accepted = 0;
            for pass in 0..10 {
                accepted += painter.evolve_once(pass_seed(42, pass)).unwrap().accepted;
            }
            let elapsed = start.elapsed();

            println!(
                "  {:<12} error {} -> {} ({} accepted) in {:.2}s",
                if incremental { "incremental" } else { "full" },
                initial,
                painter.error(),
                accepted,
                elapsed.as_secs_f64()
            );
        }
        println!();
    }

    println!("=== Independent Runs (fixed 128x128 canvas) ===\n");

    let scene = scene(128, true);
    for runs in [1, 2, 4, 8] {
        let seeds: Vec<u64> = (0..runs).collect();

        let start = Instant::now();
        let painters = evolve_independent(&scene, &seeds, 40, 5).unwrap();
        let elapsed = start.elapsed();

        let best = painters.iter().map(|p| p.error()).min().unwrap_or(0);
        println!(
            "Runs {}: best error {} in {:.2}s ({:.1} runs/sec)",
            runs,
            best,
            elapsed.as_secs_f64(),
            runs as f64 / elapsed.as_secs_f64()
        );
    }
}
