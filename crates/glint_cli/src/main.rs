use anyhow::{Context, Result};
use clap::Parser;
use glint_core::TraceConfig;
use glint_renderer::{ImageBuffer, RayTracer, DEFAULT_BUFFER_WIDTH};
use log::{info, LevelFilter};
use std::path::Path;
use std::time::Instant;

mod cli;

use cli::Args;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Configuration file (if any) with explicit flags applied on top.
fn trace_config(args: &Args) -> Result<TraceConfig> {
    let mut config = match &args.config {
        Some(path) => TraceConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TraceConfig::default(),
    };

    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(constant) = args.constant {
        config.attenuation.constant = constant;
    }
    if let Some(linear) = args.linear {
        config.attenuation.linear = linear;
    }
    if let Some(quadratic) = args.quadratic {
        config.attenuation.quadratic = quadratic;
    }

    Ok(config)
}

/// Output resolution: explicit flags win, a missing side follows the aspect ratio.
fn image_size(width: Option<u32>, height: Option<u32>, aspect: f32) -> (u32, u32) {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let round = |v: f32| ((v + 0.5) as u32).max(1);

    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, round(w as f32 / aspect)),
        (None, Some(h)) => (round(h as f32 * aspect), h),
        (None, None) => (DEFAULT_BUFFER_WIDTH, round(DEFAULT_BUFFER_WIDTH as f32 / aspect)),
    }
}

/// Write the buffer as PNG. Buffer row 0 is the bottom of the image.
fn save_png(buffer: &ImageBuffer, path: &Path) -> Result<()> {
    let image = image::RgbImage::from_raw(
        buffer.width(),
        buffer.height(),
        buffer.as_bytes().to_vec(),
    )
    .context("Pixel buffer does not match its dimensions")?;
    image::imageops::flip_vertical(&image)
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Image saved as {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut tracer = RayTracer::default();
    tracer
        .set_config(trace_config(&args)?)
        .context("Invalid trace configuration")?;

    tracer
        .load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let (width, height) = image_size(args.width, args.height, tracer.aspect_ratio());
    tracer.trace_setup(width, height);

    let config = tracer.config();
    info!(
        "Rendering {}x{}, depth {}, threshold {}",
        width, height, config.max_depth, config.threshold
    );

    let start = Instant::now();
    tracer.render(args.bucket_size);
    info!("Frame finished in {:?}", start.elapsed());

    save_png(tracer.buffer(), &args.output)
}
