//! Ray-ellipsoid intersection (rescale to a unit sphere).

use scenepick_math::{Tolerance, Vec3};

use super::{nearest_non_negative, solve_quadratic, LocalHit};
use crate::Ray;

/// Intersect a ray with an axis-aligned ellipsoid centered at the local
/// origin with per-axis `radii`.
///
/// The ray is divided component-wise by the radii, which turns the ellipsoid
/// into the unit sphere. The scaled direction is renormalized for the solve
/// and the root is mapped back to the unscaled ray parameter, so the hit
/// point is `origin + t * direction` in the unscaled local frame.
pub fn intersect_ellipsoid(ray: &Ray, radii: &Vec3) -> Option<LocalHit> {
    let tol = Tolerance::DEFAULT;
    if radii.iter().any(|r| r.abs() < tol.norm) {
        return None;
    }

    let o = ray.origin.coords.component_div(radii);
    let d = ray.direction.as_ref().component_div(radii);
    let scale = d.norm();
    if scale < tol.norm {
        return None;
    }
    let d = d / scale;

    let b = 2.0 * o.dot(&d);
    let c = o.dot(&o) - 1.0;
    let t_unit = nearest_non_negative(solve_quadratic(1.0, b, c)?)?;

    let t = t_unit / scale;
    let point = ray.at(t);
    let radii_sq = radii.component_mul(radii);
    Some(LocalHit {
        t,
        point,
        normal: point.coords.component_div(&radii_sq),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenepick_math::Point3;

    #[test]
    fn test_ray_ellipsoid_along_long_axis() {
        let radii = Vec3::new(3.0, 1.0, 1.0);
        let ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = intersect_ellipsoid(&ray, &radii).unwrap();
        assert!((hit.t - 7.0).abs() < 1e-10);
        assert!((hit.point.x + 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_ellipsoid_along_short_axis() {
        let radii = Vec3::new(3.0, 1.0, 2.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_ellipsoid(&ray, &radii).unwrap();
        assert!((hit.t - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_ellipsoid_point_on_surface() {
        let radii = Vec3::new(2.0, 1.0, 0.5);
        let ray = Ray::new(Point3::new(-4.0, 0.3, 0.1), Vec3::new(1.0, 0.05, 0.0));
        let hit = intersect_ellipsoid(&ray, &radii).unwrap();
        let p = hit.point.coords.component_div(&radii);
        assert!((p.norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_ellipsoid_miss() {
        let radii = Vec3::new(3.0, 1.0, 1.0);
        let ray = Ray::new(Point3::new(-10.0, 1.5, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_ellipsoid(&ray, &radii).is_none());
    }

    #[test]
    fn test_ray_ellipsoid_degenerate_radius() {
        let ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_ellipsoid(&ray, &Vec3::new(1.0, 0.0, 1.0)).is_none());
    }
}
