//! Errors reported by camera validation and configuration loading.
//!
//! Ray generation itself cannot fail; these only surface from the opt-in
//! [`CameraConfig::validate`](crate::camera::CameraConfig::validate) step and
//! from reading configuration files.

use std::path::PathBuf;

/// Problems with a camera configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CameraError {
    /// Aspect ratio must be finite and positive.
    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f32),

    /// The image must be at least one pixel wide.
    #[error("image width must be at least 1 pixel")]
    ZeroImageWidth,

    /// Vertical field of view outside (0, 180) degrees.
    #[error("vertical field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    /// Focus distance must be finite and positive.
    #[error("focus distance must be finite and positive, got {0}")]
    InvalidFocusDistance(f32),

    /// Defocus angle outside [0, 180) degrees.
    #[error("defocus angle must lie in [0, 180) degrees, got {0}")]
    InvalidDefocusAngle(f32),

    /// A position or direction has a NaN or infinite component.
    #[error("{name} has a non-finite component")]
    NonFiniteVector {
        /// Configuration field name.
        name: &'static str,
    },

    /// `lookfrom` and `lookat` coincide, so there is no view direction.
    #[error("lookfrom and lookat coincide; the view direction is undefined")]
    DegenerateView,

    /// `vup` is parallel to the view direction, so "right" is undefined.
    #[error("vup is parallel to the view direction; the camera basis is undefined")]
    UpParallelToView,

    /// The configuration file could not be read.
    #[error("failed to read camera config {}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for a camera.
    #[error("failed to parse camera config {}", path.display())]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
