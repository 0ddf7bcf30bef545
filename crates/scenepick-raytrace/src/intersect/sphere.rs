//! Ray-sphere intersection (quadratic equation).

use super::{nearest_non_negative, solve_quadratic, LocalHit};
use crate::Ray;

/// Intersect a ray with a sphere of `radius` centered at the local origin.
///
/// Returns the nearer root if it is in front of the origin, otherwise the
/// farther one (ray starting inside).
pub fn intersect_sphere(ray: &Ray, radius: f64) -> Option<LocalHit> {
    let oc = ray.origin.coords;
    let d = ray.direction.as_ref();

    // Quadratic: |oc + t*d|^2 = r^2
    let a = d.dot(d);
    let b = 2.0 * oc.dot(d);
    let c = oc.dot(&oc) - radius * radius;

    let t = nearest_non_negative(solve_quadratic(a, b, c)?)?;
    let point = ray.at(t);
    Some(LocalHit {
        t,
        point,
        normal: point.coords,
    })
}
