use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use lenscast::config::load_camera_config;
use lenscast::probe;
use lenscast::random::ThreadSampler;
use lenscast::{Camera, CameraConfig, Interval};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn log_camera(camera: &Camera) {
    let config = camera.config();
    info!(
        "Image resolution: {}x{}, samples per pixel: {}, max depth: {}",
        camera.image_width(),
        camera.image_height(),
        camera.samples_per_pixel(),
        camera.max_depth()
    );
    info!(
        "View: from {} at {} up {}, vfov {}°",
        config.lookfrom, config.lookat, config.vup, config.vfov
    );
    info!("Basis: u {} v {} w {}", camera.u(), camera.v(), camera.w());
    info!(
        "Pixel grid: pixel00 {} du {} dv {}",
        camera.pixel00_loc(),
        camera.pixel_delta_u(),
        camera.pixel_delta_v()
    );
    if camera.defocus_radius() > 0.0 {
        info!(
            "Lens: defocus angle {}°, radius {:.4}, focus distance {}",
            config.defocus_angle,
            camera.defocus_radius(),
            config.focus_dist
        );
    } else {
        info!("Lens: pinhole, focus distance {}", config.focus_dist);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("lenscast - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let config = match &args.config {
        Some(path) => load_camera_config(path)?,
        None => CameraConfig::default(),
    };
    let config = args.apply_overrides(config);
    config.validate().context("invalid camera configuration")?;

    let camera = config.initialize();
    log_camera(&camera);

    if let Some((i, j)) = args.pixel() {
        if i >= camera.image_width() || j >= camera.image_height() {
            bail!(
                "pixel ({}, {}) is outside the {}x{} image",
                i,
                j,
                camera.image_width(),
                camera.image_height()
            );
        }
        let summary = probe::sample_pixel(&camera, i, j, &mut ThreadSampler);
        info!(
            "Pixel ({}, {}): {} samples, max lens offset {:.5}, max jitter {:.5}",
            i, j, summary.samples, summary.max_lens_offset, summary.max_jitter
        );
    }

    if !args.no_sweep {
        let summary = probe::sweep(&camera, args.seed);
        // Share of well-formed rays, as a render loop would report coverage.
        let coverage = Interval::new(0.0, 1.0)
            .clamp(1.0 - summary.non_finite as f32 / summary.rays.max(1) as f32);
        let angles = match summary.angle_range_deg() {
            Some((min, max)) => format!(", angle to view axis {:.2}°..{:.2}°", min, max),
            None => String::new(),
        };
        info!(
            "Sweep: {} rays, {:.1}% finite, max lens offset {:.5}{}",
            summary.rays,
            100.0 * coverage,
            summary.max_lens_offset,
            angles
        );
    }

    Ok(())
}
