use clap::{Parser, ValueEnum};
use glint_renderer::DEFAULT_BUCKET_SIZE;
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Render a Glint scene file with a recursive ray tracer")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Trace configuration file (JSON), applied before the flags below
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum recursion depth (0 = local shading only)
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Per-channel contribution below which recursion stops
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Constant point-light attenuation coefficient
    #[arg(long)]
    pub constant: Option<f32>,

    /// Linear point-light attenuation coefficient
    #[arg(long)]
    pub linear: Option<f32>,

    /// Quadratic point-light attenuation coefficient
    #[arg(long)]
    pub quadratic: Option<f32>,

    /// Image width in pixels (defaults to 256, or derived from --height)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Image height in pixels (defaults to the camera aspect ratio)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Bucket edge length in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_BUCKET_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub bucket_size: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Logging level, overridden per module by RUST_LOG
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
