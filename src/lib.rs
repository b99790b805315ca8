//! lenscast: thin-lens camera model for an offline ray tracer
//!
//! Turns viewer settings into a cached viewing basis and emits world-space
//! rays for pixel samples, with optional depth of field. Scene intersection,
//! shading and image output belong to the caller's render loop.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod error;
pub mod interval;
pub mod probe;
pub mod random;
pub mod ray;

pub use camera::{Camera, CameraConfig};
pub use error::CameraError;
pub use interval::Interval;
pub use random::Sampler;
pub use ray::Ray;
