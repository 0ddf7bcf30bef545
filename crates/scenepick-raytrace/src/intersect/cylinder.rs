//! Ray-cylinder intersection (quadratic side plus flat caps).

use scenepick_math::{Tolerance, Vec3};

use super::{closer, solve_quadratic, LocalHit};
use crate::Ray;

/// Intersect a ray with a capped cylinder along local Z, centered at the
/// origin, spanning `z ∈ [-half_height, half_height]`.
///
/// Side candidates come from the infinite-cylinder quadratic restricted to
/// the height range; cap candidates from the planes `z = ±half_height`
/// restricted to the radius. The nearest non-negative candidate wins. A ray
/// parallel to the axis only ever meets the caps.
pub fn intersect_cylinder(ray: &Ray, radius: f64, half_height: f64) -> Option<LocalHit> {
    let best = intersect_side(ray, radius, half_height);
    [half_height, -half_height]
        .into_iter()
        .filter_map(|z| intersect_cap(ray, radius, z))
        .fold(best, closer)
}

/// Hits on the curved side with `|z| <= half_height`, nearest first.
pub(crate) fn intersect_side(ray: &Ray, radius: f64, half_height: f64) -> Option<LocalHit> {
    let tol = Tolerance::DEFAULT;
    let o = &ray.origin;
    let d = ray.direction.as_ref();

    // |o_xy + t*d_xy|^2 = r^2
    let a = d.x * d.x + d.y * d.y;
    if a < tol.parallel {
        return None;
    }
    let b = 2.0 * (o.x * d.x + o.y * d.y);
    let c = o.x * o.x + o.y * o.y - radius * radius;
    let (t1, t2) = solve_quadratic(a, b, c)?;

    [t1, t2].into_iter().find_map(|t| {
        if t < 0.0 {
            return None;
        }
        let point = ray.at(t);
        (point.z.abs() <= half_height).then(|| LocalHit {
            t,
            point,
            normal: Vec3::new(point.x, point.y, 0.0),
        })
    })
}

/// Hit on the flat cap disc at height `z`.
fn intersect_cap(ray: &Ray, radius: f64, z: f64) -> Option<LocalHit> {
    let tol = Tolerance::DEFAULT;
    let dz = ray.direction.z;
    if tol.is_parallel(dz) {
        return None;
    }
    let t = (z - ray.origin.z) / dz;
    if t < 0.0 {
        return None;
    }
    let point = ray.at(t);
    if point.x * point.x + point.y * point.y > radius * radius {
        return None;
    }
    Some(LocalHit {
        t,
        point,
        normal: Vec3::new(0.0, 0.0, z.signum()),
    })
}
