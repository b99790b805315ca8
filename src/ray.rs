//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, a semi-infinite line in
//! world space. The camera emits rays; it never intersects them.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// For camera rays this is the camera center, or a point on the lens disk
    /// when depth of field is enabled.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Camera rays are not normalized: the direction spans from the origin to
    /// the sampled point on the focus plane.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// True when both origin and direction have only finite components.
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.direction.is_finite()
    }
}
