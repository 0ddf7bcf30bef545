//! Ray-plane intersection (closed-form).

use scenepick_math::{Tolerance, Vec3};

use super::LocalHit;
use crate::Ray;

/// Intersect a ray with a finite plane in local XY (normal +Z), spanning
/// `[-half_width, half_width] × [-half_height, half_height]`.
///
/// Returns `None` if the ray is parallel to the plane, the hit is behind the
/// ray origin, or the hit falls outside the rectangle. Both faces are hit;
/// the reported normal faces the incoming ray.
pub fn intersect_plane(ray: &Ray, half_width: f64, half_height: f64) -> Option<LocalHit> {
    let tol = Tolerance::DEFAULT;
    let denom = ray.direction.z;

    // Ray is parallel to plane
    if tol.is_parallel(denom) {
        return None;
    }

    let t = -ray.origin.z / denom;

    // Intersection is behind ray origin
    if t < 0.0 {
        return None;
    }

    let point = ray.at(t);
    if point.x.abs() > half_width || point.y.abs() > half_height {
        return None;
    }

    Some(LocalHit {
        t,
        point,
        normal: Vec3::new(0.0, 0.0, -denom.signum()),
    })
}
