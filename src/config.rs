//! Camera configuration files.
//!
//! Cameras are described in TOML. Every key is optional and falls back to
//! [`CameraConfig::default`]; vectors are written as three-element arrays:
//!
//! ```toml
//! vfov = 20.0
//! lookfrom = [13.0, 2.0, 3.0]
//! lookat = [0.0, 0.0, 0.0]
//! defocus_angle = 0.6
//! focus_dist = 10.0
//! ```

use std::path::Path;

use log::info;

use crate::camera::CameraConfig;
use crate::error::CameraError;

/// Parse a camera configuration from TOML text.
pub fn parse_camera_config(text: &str) -> Result<CameraConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Read and parse a camera configuration file.
pub fn load_camera_config(path: impl AsRef<Path>) -> Result<CameraConfig, CameraError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CameraError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_camera_config(&text).map_err(|source| CameraError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded camera config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3A;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_camera_config("").unwrap(), CameraConfig::default());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config = parse_camera_config(
            r#"
            image_width = 1200
            vfov = 20.0
            lookfrom = [13.0, 2.0, 3.0]
            lookat = [0.0, 0.0, 0.0]
            defocus_angle = 0.6
            "#,
        )
        .unwrap();

        assert_eq!(config.image_width, 1200);
        assert_eq!(config.vfov, 20.0);
        assert_eq!(config.lookfrom, Vec3A::new(13.0, 2.0, 3.0));
        assert_eq!(config.lookat, Vec3A::ZERO);
        assert_eq!(config.defocus_angle, 0.6);

        let defaults = CameraConfig::default();
        assert_eq!(config.vup, defaults.vup);
        assert_eq!(config.focus_dist, defaults.focus_dist);
        assert_eq!(config.samples_per_pixel, defaults.samples_per_pixel);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_camera_config("focal_length = 1.0").is_err());
    }

    #[test]
    fn malformed_vector_is_rejected() {
        assert!(parse_camera_config("lookfrom = [1.0, 2.0]").is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = CameraConfig::new().with_lens(35.0, 1.5, 4.0);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(parse_camera_config(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_camera_config("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, CameraError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
