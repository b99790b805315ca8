//! Ray statistics over an initialized camera.
//!
//! A sweep stands in for the render loop: it asks the camera for one ray per
//! pixel from parallel workers and summarizes what came back, which makes a
//! misconfigured camera visible before any scene is traced.

use glam::Vec3A;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::random::{seeded_rng, Sampler};
use crate::ray::Ray;

/// Aggregate over every ray of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSummary {
    /// Number of rays generated.
    pub rays: u64,
    /// Rays with a NaN or infinite origin or direction.
    pub non_finite: u64,
    /// Largest distance from a ray origin to the camera center.
    pub max_lens_offset: f32,
    /// Smallest angle, in degrees, between a ray and the view direction.
    pub min_angle_deg: f32,
    /// Largest angle, in degrees, between a ray and the view direction.
    pub max_angle_deg: f32,
}

impl SweepSummary {
    const EMPTY: SweepSummary = SweepSummary {
        rays: 0,
        non_finite: 0,
        max_lens_offset: 0.0,
        min_angle_deg: f32::INFINITY,
        max_angle_deg: f32::NEG_INFINITY,
    };

    fn record(mut self, camera: &Camera, ray: &Ray) -> Self {
        self.rays += 1;
        if !ray.is_finite() {
            self.non_finite += 1;
            return self;
        }
        let offset = ray.origin.distance(camera.center());
        let angle = ray.direction.angle_between(-camera.w()).to_degrees();
        self.max_lens_offset = self.max_lens_offset.max(offset);
        self.min_angle_deg = self.min_angle_deg.min(angle);
        self.max_angle_deg = self.max_angle_deg.max(angle);
        self
    }

    /// Angle range to the view direction, `None` when no ray was finite.
    pub fn angle_range_deg(&self) -> Option<(f32, f32)> {
        (self.non_finite < self.rays).then_some((self.min_angle_deg, self.max_angle_deg))
    }

    fn merge(self, other: Self) -> Self {
        Self {
            rays: self.rays + other.rays,
            non_finite: self.non_finite + other.non_finite,
            max_lens_offset: self.max_lens_offset.max(other.max_lens_offset),
            min_angle_deg: self.min_angle_deg.min(other.min_angle_deg),
            max_angle_deg: self.max_angle_deg.max(other.max_angle_deg),
        }
    }
}

/// Generate one ray per pixel and summarize them.
///
/// Rows run in parallel. Row `j` draws from `seeded_rng(seed, j)`, so the
/// summary depends only on the camera and the seed, not on scheduling.
pub fn sweep(camera: &Camera, seed: u64) -> SweepSummary {
    let width = camera.image_width();
    let height = camera.image_height();

    info!("Sweeping {}x{} pixels using {} CPU cores...", width, height, rayon::current_num_threads());
    let sweep_start = std::time::Instant::now();
    let pb = ProgressBar::new(height as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} rows ETA: {eta}") {
        pb.set_style(style);
    }

    let summary = (0..height)
        .into_par_iter()
        .map(|j| {
            let mut rng = seeded_rng(seed, j as u64);
            let row = (0..width).fold(SweepSummary::EMPTY, |acc, i| {
                let ray = camera.get_ray(i, j, &mut rng);
                acc.record(camera, &ray)
            });
            pb.inc(1);
            row
        })
        .reduce(|| SweepSummary::EMPTY, SweepSummary::merge);

    pb.finish_and_clear();
    info!("Sweep finished in {:.2?}", sweep_start.elapsed());
    if summary.non_finite > 0 {
        warn!("{} of {} rays are not finite", summary.non_finite, summary.rays);
    }
    summary
}

/// Spread of the rays generated for a single pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSampleSummary {
    /// Number of rays generated.
    pub samples: u32,
    /// Largest distance from a ray origin to the camera center.
    pub max_lens_offset: f32,
    /// Largest distance on the focus plane from the nominal pixel center.
    pub max_jitter: f32,
}

/// Generate `samples_per_pixel` rays through pixel (`i`, `j`).
pub fn sample_pixel<S: Sampler + ?Sized>(camera: &Camera, i: u32, j: u32, sampler: &mut S) -> PixelSampleSummary {
    let nominal = camera.pixel_center(i, j);
    let mut summary = PixelSampleSummary {
        samples: 0,
        max_lens_offset: 0.0,
        max_jitter: 0.0,
    };
    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(i, j, sampler);
        // The unnormalized direction ends on the focus plane.
        let on_plane: Vec3A = ray.at(1.0);
        summary.samples += 1;
        summary.max_lens_offset = summary.max_lens_offset.max(ray.origin.distance(camera.center()));
        summary.max_jitter = summary.max_jitter.max(on_plane.distance(nominal));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;
    use crate::random::SequenceSampler;
    use approx::assert_abs_diff_eq;

    fn small_camera(defocus_angle: f32) -> Camera {
        CameraConfig::new()
            .with_image(64, 4.0 / 3.0)
            .with_position(Vec3A::new(0.0, 1.0, 4.0), Vec3A::ZERO, Vec3A::Y)
            .with_lens(50.0, defocus_angle, 4.0)
            .with_quality(32, 8)
            .initialize()
    }

    #[test]
    fn pinhole_sweep_covers_every_pixel() {
        let camera = small_camera(0.0);
        let summary = sweep(&camera, 1);
        assert_eq!(summary.rays, 64 * 48);
        assert_eq!(summary.non_finite, 0);
        assert_eq!(summary.max_lens_offset, 0.0);
        // Corner rays are bounded by the half-diagonal field of view.
        assert!(summary.min_angle_deg >= 0.0);
        assert!(summary.max_angle_deg < 50.0);
    }

    #[test]
    fn sweep_is_deterministic_for_a_seed() {
        let camera = small_camera(3.0);
        assert_eq!(sweep(&camera, 77), sweep(&camera, 77));
    }

    #[test]
    fn defocus_sweep_stays_on_lens() {
        let camera = small_camera(3.0);
        let summary = sweep(&camera, 5);
        assert_eq!(summary.non_finite, 0);
        assert!(summary.max_lens_offset > 0.0);
        assert!(summary.max_lens_offset < camera.defocus_radius() + 1e-5);
    }

    #[test]
    fn degenerate_camera_reports_non_finite_rays() {
        let camera = CameraConfig::new()
            .with_image(8, 1.0)
            .with_position(Vec3A::ONE, Vec3A::ONE, Vec3A::Y)
            .initialize();
        let summary = sweep(&camera, 0);
        assert_eq!(summary.rays, 64);
        assert_eq!(summary.non_finite, 64);
        assert_eq!(summary.angle_range_deg(), None);
    }

    #[test]
    fn angle_range_present_for_finite_rays() {
        let summary = sweep(&small_camera(0.0), 3);
        let (min, max) = summary.angle_range_deg().unwrap();
        assert!(min.is_finite() && max.is_finite());
        assert!(min <= max);
    }

    #[test]
    fn pixel_samples_without_jitter_hit_center() {
        let camera = small_camera(0.0);
        let summary = sample_pixel(&camera, 3, 4, &mut SequenceSampler::constant(0.5));
        assert_eq!(summary.samples, 32);
        assert_eq!(summary.max_lens_offset, 0.0);
        assert_abs_diff_eq!(summary.max_jitter, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn pixel_jitter_bounded_by_footprint() {
        let camera = small_camera(0.0);
        let half_diag = 0.5 * (camera.pixel_delta_u() + camera.pixel_delta_v()).length();
        let summary = sample_pixel(&camera, 10, 10, &mut seeded_rng(2, 0));
        assert!(summary.max_jitter > 0.0);
        assert!(summary.max_jitter <= half_diag + 1e-5);
    }
}
