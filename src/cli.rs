use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use lenscast::CameraConfig;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "lenscast")]
#[command(about = "Inspect the rays a thin-lens camera would emit")]
pub struct Args {
    /// Camera config file (TOML); defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Ratio of image width over height
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub vfov: Option<f32>,

    /// Lens cone angle in degrees (0 disables depth of field)
    #[arg(long)]
    pub defocus_angle: Option<f32>,

    /// Distance to the plane of perfect focus
    #[arg(long)]
    pub focus_dist: Option<f32>,

    /// Seed for the per-row sample generators
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Generate samples_per_pixel rays through one pixel and report their spread
    #[arg(long, num_args = 2, value_names = ["I", "J"])]
    pub pixel: Option<Vec<u32>>,

    /// Skip the full-image sweep
    #[arg(long)]
    pub no_sweep: bool,
}

impl Args {
    /// Apply command line overrides on top of a loaded config.
    pub fn apply_overrides(&self, mut config: CameraConfig) -> CameraConfig {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            config.aspect_ratio = aspect_ratio;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(vfov) = self.vfov {
            config.vfov = vfov;
        }
        if let Some(defocus_angle) = self.defocus_angle {
            config.defocus_angle = defocus_angle;
        }
        if let Some(focus_dist) = self.focus_dist {
            config.focus_dist = focus_dist;
        }
        config
    }

    /// Pixel requested with `--pixel`, if any.
    pub fn pixel(&self) -> Option<(u32, u32)> {
        match self.pixel.as_deref() {
            Some(&[i, j]) => Some((i, j)),
            _ => None,
        }
    }
}
