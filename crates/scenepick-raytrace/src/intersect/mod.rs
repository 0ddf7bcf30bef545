//! Ray-solid intersection algorithms.
//!
//! Every intersector works in the solid's local frame: the ray must already
//! be transformed there (see [`crate::Ray::to_local`]). Each returns the
//! nearest hit with `t >= 0`, or `None`.

mod box_shape;
mod capsule;
mod cylinder;
mod ellipsoid;
mod plane;
mod sphere;

pub use box_shape::intersect_box;
pub(crate) use box_shape::dominant_axis;
pub use capsule::intersect_capsule;
pub use cylinder::intersect_cylinder;
pub use ellipsoid::intersect_ellipsoid;
pub use plane::intersect_plane;
pub use sphere::intersect_sphere;

use scenepick_math::{Point3, Vec3};
use scenepick_scene::PrimitiveKind;

use crate::Ray;

/// Result of a ray-solid intersection in the solid's local frame.
#[derive(Debug, Clone, Copy)]
pub struct LocalHit {
    /// Parameter along the ray.
    pub t: f64,
    /// Hit point in local coordinates.
    pub point: Point3,
    /// Outward surface normal in local coordinates (not necessarily unit).
    pub normal: Vec3,
}

/// Intersect a local-frame ray with a primitive of the given kind and size.
///
/// This dispatches to the appropriate intersector based on the primitive kind.
pub fn intersect_primitive(ray: &Ray, kind: PrimitiveKind, size: &Vec3) -> Option<LocalHit> {
    match kind {
        PrimitiveKind::Box => intersect_box(ray, size),
        PrimitiveKind::Sphere => intersect_sphere(ray, size.x),
        PrimitiveKind::Cylinder => intersect_cylinder(ray, size.x, size.y),
        PrimitiveKind::Capsule => intersect_capsule(ray, size.x, size.y),
        PrimitiveKind::Plane => intersect_plane(ray, size.x, size.y),
        PrimitiveKind::Ellipsoid => intersect_ellipsoid(ray, size),
    }
}

/// Real roots of `a·t² + b·t + c = 0`, smaller first. `None` when the
/// discriminant is negative or `a` is zero.
pub(crate) fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        return None;
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    if t1 <= t2 {
        Some((t1, t2))
    } else {
        Some((t2, t1))
    }
}

/// Nearest root that is not behind the ray origin.
pub(crate) fn nearest_non_negative((t1, t2): (f64, f64)) -> Option<f64> {
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Keep `candidate` if it is closer than `best`. Equal distances keep `best`.
pub(crate) fn closer(best: Option<LocalHit>, candidate: LocalHit) -> Option<LocalHit> {
    match best {
        Some(b) if b.t <= candidate.t => Some(b),
        _ => Some(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_quadratic() {
        // (t - 1)(t - 3) = t² - 4t + 3
        let (t1, t2) = solve_quadratic(1.0, -4.0, 3.0).unwrap();
        assert!((t1 - 1.0).abs() < 1e-12);
        assert!((t2 - 3.0).abs() < 1e-12);
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
        assert!(solve_quadratic(0.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn test_nearest_non_negative() {
        assert_eq!(nearest_non_negative((1.0, 2.0)), Some(1.0));
        assert_eq!(nearest_non_negative((-1.0, 2.0)), Some(2.0));
        assert_eq!(nearest_non_negative((-2.0, -1.0)), None);
    }

    #[test]
    fn test_dispatch_covers_all_kinds() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let size = Vec3::new(1.0, 1.0, 1.0);
        for kind in PrimitiveKind::ALL {
            let hit = intersect_primitive(&ray, kind, &size);
            assert!(hit.is_some(), "{kind} should be hit head-on");
        }
    }

    #[test]
    fn test_closer_keeps_first_on_tie() {
        let a = LocalHit { t: 1.0, point: Point3::new(1.0, 0.0, 0.0), normal: Vec3::x() };
        let b = LocalHit { t: 1.0, point: Point3::new(2.0, 0.0, 0.0), normal: Vec3::x() };
        let kept = closer(Some(a), b).unwrap();
        assert!((kept.point.x - 1.0).abs() < 1e-12);
    }
}
