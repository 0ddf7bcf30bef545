//! Ray-box intersection (slab method).

use scenepick_math::{Tolerance, Vec3};

use super::LocalHit;
use crate::Ray;

/// Intersect a ray with a box centered at the local origin with the given
/// half-extents.
///
/// A direction component below [`Tolerance::parallel`] uses
/// [`Tolerance::parallel_reciprocal`] instead of dividing, which pushes that
/// slab's bounds to ±huge: always inside when the origin lies between the
/// slab planes, never inside otherwise. A ray starting inside the box hits
/// the exit face.
pub fn intersect_box(ray: &Ray, half: &Vec3) -> Option<LocalHit> {
    let tol = Tolerance::DEFAULT;
    let d = ray.direction.as_ref();
    let o = &ray.origin;

    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;

    for i in 0..3 {
        let inv = if tol.is_parallel(d[i]) {
            tol.parallel_reciprocal
        } else {
            1.0 / d[i]
        };
        let mut t1 = (-half[i] - o[i]) * inv;
        let mut t2 = (half[i] - o[i]) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
    }

    if t_max < t_min || t_max < 0.0 {
        return None;
    }

    let t = if t_min >= 0.0 { t_min } else { t_max };
    let point = ray.at(t);
    let axis = dominant_axis(&point.coords, half);
    let mut normal = Vec3::zeros();
    normal[axis] = point[axis].signum();

    Some(LocalHit { t, point, normal })
}

/// Index of the face a surface point lies on: the axis where the point is
/// closest to its half-extent. Ties go to the lower axis.
pub(crate) fn dominant_axis(p: &Vec3, half: &Vec3) -> usize {
    let tol = Tolerance::DEFAULT;
    let ratio = |i: usize| {
        if half[i].abs() < tol.norm {
            p[i].abs()
        } else {
            (p[i] / half[i]).abs()
        }
    };
    let mut axis = 0;
    for i in 1..3 {
        if ratio(i) > ratio(axis) {
            axis = i;
        }
    }
    axis
}
