//! Surface (u, v) coordinates of local-frame hit points.
//!
//! Values land in `[0, 1]` for points on the surface. Points slightly off
//! the surface (or on seams) may fall marginally outside; that is not an
//! error. Azimuthal `u` uses `(atan2(y, x) + π) / 2π`, so the seam sits on
//! the local -X half-axis and `+X` maps to `u = 0.5`.

use std::f64::consts::PI;

use scenepick_math::{Point2, Point3, Tolerance, Vec3};
use scenepick_scene::PrimitiveKind;

use crate::intersect::dominant_axis;

/// Relative distance from a cylinder cap plane within which a point counts as
/// on the cap. Scaled by the cylinder's largest extent (at least 1).
pub const CAP_EPSILON: f64 = 1e-6;

/// Compute UV coordinates for a local-frame point on a primitive of the
/// given kind and size.
pub fn compute_uv(kind: PrimitiveKind, point: &Point3, size: &Vec3) -> Point2 {
    match kind {
        PrimitiveKind::Box => box_uv(point, size),
        PrimitiveKind::Sphere => sphere_uv(&point.coords),
        PrimitiveKind::Cylinder => cylinder_uv(point, size.x, size.y),
        PrimitiveKind::Capsule => capsule_uv(point, size.y),
        PrimitiveKind::Plane => plane_uv(point, size.x, size.y),
        PrimitiveKind::Ellipsoid => ellipsoid_uv(point, size),
    }
}

/// Planar projection onto the face the point lies on: the two remaining axes,
/// in increasing axis order, each mapped from `[-half, half]` to `[0, 1]`.
pub fn box_uv(point: &Point3, half: &Vec3) -> Point2 {
    let axis = dominant_axis(&point.coords, half);
    let (i, j) = match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    Point2::new(unit_span(point[i], half[i]), unit_span(point[j], half[j]))
}

/// Longitude/colatitude mapping about local Z. The center maps to `(0, 0)`.
pub fn sphere_uv(p: &Vec3) -> Point2 {
    let len = p.norm();
    if len < Tolerance::DEFAULT.norm {
        return Point2::new(0.0, 0.0);
    }
    let v = (p.z / len).clamp(-1.0, 1.0).acos() / PI;
    Point2::new(azimuth(p.x, p.y), v)
}

/// Cap points (within [`CAP_EPSILON`] of `z = ±half_height`, relative to the
/// cylinder's size) map planarly by X/Y over the radius; side points map
/// azimuth to `u` and height to `v`.
pub fn cylinder_uv(point: &Point3, radius: f64, half_height: f64) -> Point2 {
    let scale = half_height.abs().max(radius.abs()).max(1.0);
    if (point.z.abs() - half_height).abs() <= CAP_EPSILON * scale {
        return Point2::new(unit_span(point.x, radius), unit_span(point.y, radius));
    }
    side_uv(point, half_height)
}

/// Points at or beyond `z = ±half_height` belong to the hemispheres and use
/// the sphere mapping about the cap center; the rest use the cylinder side
/// mapping.
pub fn capsule_uv(point: &Point3, half_height: f64) -> Point2 {
    if point.z >= half_height {
        sphere_uv(&(point.coords - Vec3::new(0.0, 0.0, half_height)))
    } else if point.z <= -half_height {
        sphere_uv(&(point.coords + Vec3::new(0.0, 0.0, half_height)))
    } else {
        side_uv(point, half_height)
    }
}

/// `u` across the width, `v` across the height.
pub fn plane_uv(point: &Point3, half_width: f64, half_height: f64) -> Point2 {
    Point2::new(unit_span(point.x, half_width), unit_span(point.y, half_height))
}

/// Sphere mapping of the point rescaled onto the unit sphere.
pub fn ellipsoid_uv(point: &Point3, radii: &Vec3) -> Point2 {
    let tol = Tolerance::DEFAULT;
    let safe = radii.map(|r| if r.abs() < tol.norm { 1.0 } else { r });
    sphere_uv(&point.coords.component_div(&safe))
}

fn side_uv(point: &Point3, half_height: f64) -> Point2 {
    let v = if half_height.abs() < Tolerance::DEFAULT.norm {
        0.5
    } else {
        (point.z + half_height) / (2.0 * half_height)
    };
    Point2::new(azimuth(point.x, point.y), v)
}

fn azimuth(x: f64, y: f64) -> f64 {
    (y.atan2(x) + PI) / (2.0 * PI)
}

/// Map `x ∈ [-half, half]` to `[0, 1]`; a zero span maps to the midpoint.
fn unit_span(x: f64, half: f64) -> f64 {
    if half.abs() < Tolerance::DEFAULT.norm {
        0.5
    } else {
        (x / half + 1.0) / 2.0
    }
}
