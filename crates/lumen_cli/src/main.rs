use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{
    render, render_parallel, save_image, scene, write_ppm, CameraConfig, Hittable, HittableList,
    ImageBuffer, RenderConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufWriter, Write};

mod cli;

use cli::{Args, LogLevel, SceneKind};

/// Build the selected scene together with its camera placement.
fn build_scene(
    kind: SceneKind,
    aspect_ratio: f32,
    rng: &mut StdRng,
) -> (HittableList, CameraConfig) {
    match kind {
        SceneKind::Practice => (scene::practice_scene(), scene::practice_camera(aspect_ratio)),
        SceneKind::Random => (scene::random_scene(rng), scene::random_camera(aspect_ratio)),
    }
}

/// Initialize env_logger from `RUST_LOG` (default `info`); an explicit
/// `--log-level` takes precedence.
fn init_logging(level: Option<LogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

/// Write PPM to `stdout` when the output is `-`, otherwise save to the file.
fn write_output<W: Write>(image: &ImageBuffer, args: &Args, stdout: W) -> Result<()> {
    if args.to_stdout() {
        let mut writer = BufWriter::new(stdout);
        write_ppm(image, &mut writer).context("Failed to write image to stdout")?;
        return Ok(());
    }

    save_image(image, &args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_level);

    log::info!("Starting Lumen");

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = RenderConfig {
        image_width: args.width,
        image_height: args.height(),
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
        column_order: args.column_order(),
    };
    config.validate().context("Invalid render settings")?;

    let (objects, camera_config) = build_scene(args.scene, config.aspect_ratio(), &mut rng);
    log::info!("Scene {:?} built with {} objects", args.scene, objects.len());

    let camera = camera_config.build();
    let world = Hittable::from(objects);

    let image = if args.parallel {
        render_parallel(&camera, &world, &config, seed)?
    } else {
        render(&camera, &world, &config, &mut rng)?
    };

    write_output(&image, &args, io::stdout().lock())?;

    log::info!("Done");
    Ok(())
}
