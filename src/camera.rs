//! Thin-lens camera for ray generation.
//!
//! A camera lives in two stages. [`CameraConfig`] holds the viewer-facing
//! settings and may be edited freely. [`CameraConfig::initialize`] derives the
//! viewing basis and pixel grid once and returns a [`Camera`], which is
//! immutable and can be shared by reference across render workers.

use glam::Vec3A;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;
use crate::interval::Interval;
use crate::random::{self, Sampler};
use crate::ray::Ray;

/// Open range of strictly positive finite values.
const POSITIVE: Interval = Interval::new(0.0, f32::INFINITY);
/// Angles in degrees accepted for the vertical field of view and lens cone.
const HALF_TURN: Interval = Interval::new(0.0, 180.0);
/// Squared sine of the smallest angle allowed between `vup` and the view direction.
const MIN_SIN2_UP_VIEW: f32 = 1e-12;

/// Viewer-facing camera settings.
///
/// Every field may be changed until [`initialize`](Self::initialize) is
/// called. Missing fields in a config file fall back to [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Variation angle of rays through each pixel, in degrees. 0 is a pinhole.
    pub defocus_angle: f32,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Creates a config with default settings.
    ///
    /// Default: 400 pixels wide at 16:9, 100 samples per pixel, 90° FOV, no
    /// defocus blur, focused 10 units ahead.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set image width and aspect ratio.
    pub fn with_image(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, lookfrom: Vec3A, lookat: Vec3A, vup: Vec3A) -> Self {
        self.lookfrom = lookfrom;
        self.lookat = lookat;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Image height implied by the width and aspect ratio, never below 1.
    pub fn image_height(&self) -> u32 {
        // `as` saturates, and maps NaN to 0.
        let height = (self.image_width as f32 / self.aspect_ratio) as u32;
        height.max(1)
    }

    /// Check the settings for values that would produce an undefined basis
    /// or a meaningless projection.
    ///
    /// [`initialize`](Self::initialize) does not call this; degenerate input
    /// there yields non-finite vectors instead of an error.
    pub fn validate(&self) -> Result<(), CameraError> {
        if !POSITIVE.surrounds(self.aspect_ratio) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.image_width == 0 {
            return Err(CameraError::ZeroImageWidth);
        }
        if !HALF_TURN.surrounds(self.vfov) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }
        if !HALF_TURN.contains(self.defocus_angle) || self.defocus_angle == HALF_TURN.max() {
            return Err(CameraError::InvalidDefocusAngle(self.defocus_angle));
        }
        if !POSITIVE.surrounds(self.focus_dist) {
            return Err(CameraError::InvalidFocusDistance(self.focus_dist));
        }

        for (name, vector) in [
            ("lookfrom", self.lookfrom),
            ("lookat", self.lookat),
            ("vup", self.vup),
        ] {
            if !vector.is_finite() {
                return Err(CameraError::NonFiniteVector { name });
            }
        }

        let view = self.lookfrom - self.lookat;
        if !view.length_recip().is_finite() {
            return Err(CameraError::DegenerateView);
        }
        let right = self.vup.cross(view);
        if right.length_squared() <= MIN_SIN2_UP_VIEW * self.vup.length_squared() * view.length_squared() {
            return Err(CameraError::UpParallelToView);
        }

        Ok(())
    }

    /// Derive the viewing basis, pixel grid and lens disk.
    ///
    /// Pure function of the settings: calling it twice yields equal cameras.
    /// The viewport is placed at `focus_dist`, so geometry on that plane stays
    /// sharp for any defocus angle.
    pub fn initialize(&self) -> Camera {
        let image_height = self.image_height();

        let pixel_samples_scale = if self.samples_per_pixel == 0 {
            0.0
        } else {
            1.0 / self.samples_per_pixel as f32
        };

        let center = self.lookfrom;

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * self.aspect_ratio;

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        let w = (self.lookfrom - self.lookat).normalize(); // Points opposite view direction
        let u = self.vup.cross(w).normalize(); // Points to camera right
        let v = w.cross(u); // Points to camera up

        // Rows run downward in the image, so the vertical edge follows -v.
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / self.image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left = center - (self.focus_dist * w) - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        // Non-positive angles are a pinhole; get_ray never samples the disk for them.
        let defocus_radius = if self.defocus_angle <= 0.0 {
            0.0
        } else {
            self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan()
        };
        let defocus_disk_u = u * defocus_radius;
        let defocus_disk_v = v * defocus_radius;

        debug!(
            "Camera initialized: {}x{}, viewport {:.4}x{:.4}, defocus radius {:.4}",
            self.image_width, image_height, viewport_width, viewport_height, defocus_radius
        );

        Camera {
            config: *self,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            pixel_samples_scale,
            u,
            v,
            w,
            defocus_disk_u,
            defocus_disk_v,
        }
    }
}

/// Camera with its derived viewing state.
///
/// Only obtainable through [`CameraConfig::initialize`] and immutable
/// afterwards, so concurrent [`get_ray`](Self::get_ray) calls never observe a
/// half-written basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    config: CameraConfig,
    /// Rendered image height in pixel count
    image_height: u32,
    /// Camera position in world space (same as lookfrom)
    center: Vec3A,
    /// World position of the top-left pixel center (pixel 0,0)
    pixel00_loc: Vec3A,
    /// Offset from pixel to pixel horizontally (right direction)
    pixel_delta_u: Vec3A,
    /// Offset from pixel to pixel vertically (down direction)
    pixel_delta_v: Vec3A,
    /// Color scale factor for a sum of pixel samples
    pixel_samples_scale: f32,
    u: Vec3A,
    v: Vec3A,
    w: Vec3A,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: Vec3A,
    /// Defocus disk vertical radius vector
    defocus_disk_v: Vec3A,
}

impl Camera {
    /// Generate a ray through pixel (`i`, `j`) with random sampling.
    ///
    /// Two sampler draws jitter the sample point within the pixel footprint
    /// for anti-aliasing. When the defocus angle is positive, further draws
    /// pick the origin on the lens disk. The direction is not normalized.
    ///
    /// `i` must lie in `[0, image_width)` and `j` in `[0, image_height)`;
    /// other values extrapolate the pixel grid and are not checked.
    pub fn get_ray<S: Sampler + ?Sized>(&self, i: u32, j: u32, sampler: &mut S) -> Ray {
        let offset = random::sample_square(sampler);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(sampler)
        };
        let ray_direction = pixel_sample - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }

    /// Sample random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample<S: Sampler + ?Sized>(&self, sampler: &mut S) -> Vec3A {
        let p = random::random_in_unit_disk(sampler);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Unjittered center of pixel (`i`, `j`) on the focus plane.
    pub fn pixel_center(&self, i: u32, j: u32) -> Vec3A {
        self.pixel00_loc + (i as f32 * self.pixel_delta_u) + (j as f32 * self.pixel_delta_v)
    }

    /// Settings this camera was derived from.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Rendered image width in pixels.
    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    /// Rendered image height in pixels, at least 1.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Samples the render loop should take per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    /// Maximum ray-bounce depth for the render loop.
    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// `1 / samples_per_pixel`, or 0 when no samples are taken.
    pub fn pixel_samples_scale(&self) -> f32 {
        self.pixel_samples_scale
    }

    /// Camera center in world space.
    pub fn center(&self) -> Vec3A {
        self.center
    }

    /// Camera right axis.
    pub fn u(&self) -> Vec3A {
        self.u
    }

    /// Camera up axis.
    pub fn v(&self) -> Vec3A {
        self.v
    }

    /// Camera back axis, pointing from `lookat` toward `lookfrom`.
    pub fn w(&self) -> Vec3A {
        self.w
    }

    /// Center of pixel (0, 0), the upper-left pixel.
    pub fn pixel00_loc(&self) -> Vec3A {
        self.pixel00_loc
    }

    /// Step from one pixel to the next along a row.
    pub fn pixel_delta_u(&self) -> Vec3A {
        self.pixel_delta_u
    }

    /// Step from one row to the next, pointing down the image.
    pub fn pixel_delta_v(&self) -> Vec3A {
        self.pixel_delta_v
    }

    /// Lens disk spanning vector along `u`.
    pub fn defocus_disk_u(&self) -> Vec3A {
        self.defocus_disk_u
    }

    /// Lens disk spanning vector along `v`.
    pub fn defocus_disk_v(&self) -> Vec3A {
        self.defocus_disk_v
    }

    /// Radius of the lens disk, 0 for a pinhole.
    pub fn defocus_radius(&self) -> f32 {
        self.defocus_disk_u.length()
    }
}
