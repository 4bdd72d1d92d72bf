//! Simple path tracer example.
//!
//! Renders the random sphere scene in parallel and saves it to PPM format.

use lumen_renderer::{render_parallel, save_ppm, scene, Hittable, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn main() {
    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let seed = 2024;
    let mut rng = StdRng::seed_from_u64(seed);

    // Build the scene
    let start = std::time::Instant::now();
    let objects = scene::random_scene(&mut rng);
    println!("Created {} objects in {:?}", objects.len(), start.elapsed());
    let world = Hittable::from(objects);

    // Render configuration
    let config = RenderConfig {
        image_width: 600,
        image_height: 400,
        samples_per_pixel: 32,
        max_depth: 10,
        ..RenderConfig::default()
    };
    let camera = scene::random_camera(config.aspect_ratio()).build();

    println!(
        "Rendering {}x{} @ {} spp...",
        config.image_width, config.image_height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &world, &config, seed).expect("Failed to render");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, Path::new(filename)).expect("Failed to save image");
    println!("Saved to {}", filename);
}
