//! Genetic Brush CLI - Paint a target image from a JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use genetic_brush::{
    BrushSet, PaintConfig, Painter, Scene,
    compute::evolution::pass_seed,
    io::{self, DEFAULT_MAX_SIDE},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 5 {
        eprintln!(
            "Usage: {} <config.json> <target> <brush_dir> <output.png> [passes]",
            args[0]
        );
        eprintln!();
        eprintln!("Approximate a target image with evolved brushstrokes.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to painting configuration file");
        eprintln!("  target       Image to approximate (converted to greyscale)");
        eprintln!("  brush_dir    Directory holding brush textures 0.jpg, 1.jpg, ...");
        eprintln!("  output.png   Where to save the painting");
        eprintln!("  passes       Number of evolution passes (default: 100)");
        eprintln!();
        eprintln!("An optional <config>.mask.png next to the config biases stroke placement.");
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let target_path = PathBuf::from(&args[2]);
    let brush_dir = PathBuf::from(&args[3]);
    let output_path = PathBuf::from(&args[4]);
    let passes: usize = args.get(5).and_then(|s| s.parse().ok()).unwrap_or(100);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: PaintConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let seed = config.random_seed.unwrap_or_else(rand::random);
    let stroke_count = config.stroke_count;

    let target = io::load_target(&target_path, DEFAULT_MAX_SIDE).unwrap_or_else(|e| {
        eprintln!("Error loading target: {}", e);
        std::process::exit(1);
    });

    let brushes = BrushSet::load_dir(&brush_dir, config.max_brush_number).unwrap_or_else(|e| {
        eprintln!("Error loading brushes: {}", e);
        std::process::exit(1);
    });

    let mut scene = Scene::from_target(config, target, brushes).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // Load mask if present
    let mask_path = config_path.with_extension("mask.png");
    if mask_path.exists() {
        scene = io::load_mask(&mask_path)
            .and_then(|mask| scene.with_sampling_mask(&mask))
            .unwrap_or_else(|e| {
                eprintln!("Error loading sampling mask: {}", e);
                std::process::exit(1);
            });
        println!("Sampling mask: {}", mask_path.display());
    }

    println!("Genetic Brush");
    println!("=============");
    println!("Canvas: {}x{}", scene.width(), scene.height());
    println!("Strokes: {}", stroke_count);
    println!(
        "Stroke size: {:.2}..{:.2} (padding {}px)",
        scene.config().min_size,
        scene.config().max_size,
        scene.config().padding()
    );
    println!("Passes: {}", passes);
    println!("Seed: {}", seed);
    println!();

    let scene = Arc::new(scene);
    let mut painter = Painter::init_genome(scene, stroke_count, seed).unwrap_or_else(|e| {
        eprintln!("Error initializing genome: {}", e);
        std::process::exit(1);
    });
    let initial_error = painter.error();
    println!("Initial error: {}", initial_error);
    println!();

    println!("Evolving...");
    let start = Instant::now();
    let mut accepted = 0;

    for i in 0..passes {
        let report = painter.evolve_once(pass_seed(seed, i)).unwrap_or_else(|e| {
            eprintln!("Error in pass {}: {}", i + 1, e);
            std::process::exit(1);
        });
        accepted += report.accepted;

        // Print progress every 10%
        if (i + 1) % (passes / 10).max(1) == 0 {
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Pass {}/{}: error={}, accepted={}, {:.1} passes/s",
                i + 1,
                passes,
                report.error,
                accepted,
                (i + 1) as f32 / elapsed
            );
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("Final error: {}", painter.error());
    if initial_error > 0 {
        println!(
            "Improvement: {:.2}%",
            (1.0 - painter.error() as f64 / initial_error as f64) * 100.0
        );
    }
    println!("Accepted mutations: {}", accepted);
    println!("Time: {:.2}s", elapsed.as_secs_f32());

    if let Err(e) = io::save_image(painter.image(), &output_path) {
        eprintln!("Error saving painting: {}", e);
        std::process::exit(1);
    }

    let genome_path = output_path.with_extension("genome.json");
    let genome_json = serde_json::to_string_pretty(painter.genome()).unwrap_or_else(|e| {
        eprintln!("Error serializing genome: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = fs::write(&genome_path, genome_json) {
        eprintln!("Error writing genome: {}", e);
        std::process::exit(1);
    }

    println!("Saved {} and {}", output_path.display(), genome_path.display());
}

fn print_example_config() {
    let config = PaintConfig {
        random_seed: Some(0),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
