//! Ray representation and hit records.

use scenepick_math::{normalize_or_fallback, Dir3, Point2, Point3, Transform, Vec3};
use scenepick_scene::{NodeId, PrimitiveKind};

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction is normalized; a near-zero or non-finite direction is
    /// replaced by `(0, 0, -1)` rather than producing NaNs.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize_or_fallback(&direction),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Express this ray in the local frame of a rigid `transform`.
    ///
    /// The rotated direction is renormalized to absorb floating-point drift,
    /// so ray parameters are identical in both frames.
    pub fn to_local(&self, transform: &Transform) -> Ray {
        Ray::new(
            transform.to_local_point(&self.origin),
            transform.to_local_vec(self.direction.as_ref()),
        )
    }
}

/// Result of a successful pick: the nearest primitive along a ray.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    /// The primitive that was hit. Refers into the scene; does not own it.
    pub node: NodeId,
    /// Shape of the primitive that was hit.
    pub shape: PrimitiveKind,
    /// Distance along the ray (the ray parameter `t`, since directions are unit).
    pub distance: f64,
    /// Hit point in world space.
    pub world_point: Point3,
    /// Hit point in the primitive's local frame.
    pub local_point: Point3,
    /// Outward surface normal in world space. For planes, the face toward the
    /// ray origin.
    pub normal: Dir3,
    /// Surface coordinates of the hit; see [`crate::uv`].
    pub uv: Point2,
    /// The ray that produced this hit.
    pub ray: Ray,
}
