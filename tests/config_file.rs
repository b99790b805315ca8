use std::fs;

use glam::Vec3A;
use lenscast::config::load_camera_config;
use lenscast::random::SequenceSampler;
use lenscast::CameraError;

#[test]
fn loads_and_initializes_camera_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("camera.toml");
    fs::write(
        &path,
        r#"
        aspect_ratio = 1.0
        image_width = 100
        vfov = 90.0
        lookfrom = [0.0, 0.0, 0.0]
        lookat = [0.0, 0.0, -1.0]
        vup = [0.0, 1.0, 0.0]
        defocus_angle = 0.0
        focus_dist = 1.0
        "#,
    )
    .unwrap();

    let config = load_camera_config(&path).unwrap();
    config.validate().unwrap();
    let camera = config.initialize();

    assert_eq!(camera.image_height(), 100);
    assert!(camera.w().abs_diff_eq(Vec3A::Z, 1e-6));
    assert!((camera.pixel_delta_u().x - 0.02).abs() < 1e-6);

    let ray = camera.get_ray(50, 50, &mut SequenceSampler::constant(0.5));
    assert_eq!(ray.origin, Vec3A::ZERO);
    // Pixel 50 is just past the middle of the 100-pixel grid.
    assert!(ray.direction.abs_diff_eq(Vec3A::new(0.01, -0.01, -1.0), 1e-5));
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "vfov = \"wide\"\n").unwrap();

    let err = load_camera_config(&path).unwrap_err();
    assert!(matches!(err, CameraError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}
