//! Ray-capsule intersection (cylinder side plus two hemispheres).

use scenepick_math::{Point3, Vec3};

use super::cylinder::intersect_side;
use super::{closer, solve_quadratic, LocalHit};
use crate::Ray;

/// Intersect a ray with a capsule along local Z: a cylinder of `radius`
/// spanning `z ∈ [-half_height, half_height]` closed by hemispheres centered
/// at `z = ±half_height`.
///
/// The hemispheres are solved before the side and the side only replaces a
/// cap hit when strictly nearer, so a hit exactly on the seam belongs to the
/// hemisphere.
pub fn intersect_capsule(ray: &Ray, radius: f64, half_height: f64) -> Option<LocalHit> {
    let upper = intersect_hemisphere(ray, radius, half_height, 1.0);
    let lower = intersect_hemisphere(ray, radius, half_height, -1.0);
    let caps = match (upper, lower) {
        (Some(u), Some(l)) => closer(Some(u), l),
        (u, l) => u.or(l),
    };
    match intersect_side(ray, radius, half_height) {
        Some(side) => closer(caps, side),
        None => caps,
    }
}

/// Nearest non-negative hit on the half of the sphere at `z = side·half_height`
/// that faces away from the capsule center.
fn intersect_hemisphere(ray: &Ray, radius: f64, half_height: f64, side: f64) -> Option<LocalHit> {
    let center = Point3::new(0.0, 0.0, side * half_height);
    let oc = ray.origin - center;
    let d = ray.direction.as_ref();

    let a = d.dot(d);
    let b = 2.0 * oc.dot(d);
    let c = oc.dot(&oc) - radius * radius;
    let (t1, t2) = solve_quadratic(a, b, c)?;

    [t1, t2].into_iter().find_map(|t| {
        if t < 0.0 {
            return None;
        }
        let point = ray.at(t);
        (side * point.z >= half_height).then(|| LocalHit {
            t,
            point,
            normal: point - center,
        })
    })
}
