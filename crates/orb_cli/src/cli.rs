use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use orb_renderer::Camera;

use crate::preset::Preset;

/// Log levels accepted on the command line.
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

/// Render a scene of spheres with a CPU path tracer.
#[derive(Debug, Parser)]
#[command(name = "orb", version, about, long_about = None)]
pub struct Args {
    /// JSON scene file; takes precedence over --preset
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no scene file is given
    #[arg(long, value_enum, default_value_t = Preset::Quickstart)]
    pub preset: Preset,

    /// Output path (.ppm or .png), or "-" for PPM on stdout
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image width divided by height
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    /// Number of samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum number of ray bounces
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the render and for randomly generated presets
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Worker threads; defaults to one per core
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply image and quality overrides from the command line.
    pub fn apply_overrides(&self, camera: Camera) -> Camera {
        let aspect_ratio = self.aspect_ratio.unwrap_or(camera.aspect_ratio());
        let width = self.width.unwrap_or(camera.image_width());
        let samples = self.samples.unwrap_or(camera.samples_per_pixel());
        let max_depth = self.max_depth.unwrap_or(camera.max_depth());

        camera
            .with_image(aspect_ratio, width)
            .with_quality(samples, max_depth)
    }

    /// True when output goes to stdout instead of a file.
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
