//! Screen-to-world ray generation.

use nalgebra::Vector4;
use scenepick_math::{normalize_or_fallback, Mat4, Point3, Tolerance, Vec3};

use crate::{CameraError, Ray};

/// A validated camera snapshot: matrices known to be invertible and a
/// positive viewport.
///
/// Matrices follow the OpenGL convention: column vectors, right-handed view
/// space looking down -Z, clip-space depth in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3,
    view: Mat4,
    projection: Mat4,
    inv_view: Mat4,
    inv_projection: Mat4,
    width: f64,
    height: f64,
    orthographic: bool,
}

impl Camera {
    /// Build a camera from explicit matrices.
    ///
    /// Fails if the viewport is not finite and positive, or if either matrix
    /// is singular or has non-finite entries (before or after inversion).
    pub fn new(
        position: Point3,
        view: Mat4,
        projection: Mat4,
        width: f64,
        height: f64,
        orthographic: bool,
    ) -> Result<Self, CameraError> {
        check_viewport(width, height)?;
        check_finite("View", &view)?;
        check_finite("Projection", &projection)?;
        let inv_view = view.try_inverse().ok_or(CameraError::SingularView)?;
        let inv_projection = projection
            .try_inverse()
            .ok_or(CameraError::SingularProjection)?;
        check_finite("Inverse view", &inv_view)?;
        check_finite("Inverse projection", &inv_projection)?;
        Ok(Self {
            position,
            view,
            projection,
            inv_view,
            inv_projection,
            width,
            height,
            orthographic,
        })
    }

    /// Perspective camera at `eye` looking at `target`.
    ///
    /// `fovy_deg` is the vertical field of view in degrees; the aspect ratio
    /// comes from the viewport. Lens parameters are checked before any matrix
    /// is built, so bad input is an error rather than a panic.
    #[allow(clippy::too_many_arguments)]
    pub fn look_at_perspective(
        eye: Point3,
        target: Point3,
        up: Vec3,
        fovy_deg: f64,
        znear: f64,
        zfar: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, CameraError> {
        check_viewport(width, height)?;
        check_clip_range(znear, zfar)?;
        if !fovy_deg.is_finite() || fovy_deg.abs() <= f64::EPSILON {
            return Err(CameraError::InvalidLens(fovy_deg));
        }
        let view = Mat4::look_at_rh(&eye, &target, &up);
        let projection = Mat4::new_perspective(width / height, fovy_deg.to_radians(), znear, zfar);
        Self::new(eye, view, projection, width, height, false)
    }

    /// Orthographic camera at `eye` looking at `target`, showing
    /// `half_height` world units above and below the view center.
    #[allow(clippy::too_many_arguments)]
    pub fn look_at_orthographic(
        eye: Point3,
        target: Point3,
        up: Vec3,
        half_height: f64,
        znear: f64,
        zfar: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, CameraError> {
        check_viewport(width, height)?;
        check_clip_range(znear, zfar)?;
        let half_width = half_height * width / height;
        let degenerate = |h: f64| !h.is_finite() || h.abs() <= f64::EPSILON;
        if degenerate(half_height) || degenerate(half_width) {
            return Err(CameraError::InvalidLens(half_height));
        }
        let view = Mat4::look_at_rh(&eye, &target, &up);
        let projection =
            Mat4::new_orthographic(-half_width, half_width, -half_height, half_height, znear, zfar);
        Self::new(eye, view, projection, width, height, true)
    }

    /// World-space camera position.
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// World-to-view matrix.
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// View-to-clip matrix.
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Viewport `(width, height)` in pixels.
    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// True for parallel projection.
    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    /// Unit view direction in world space (view-space -Z).
    pub fn forward(&self) -> Vec3 {
        let f = -self.inv_view.fixed_view::<3, 1>(0, 2).into_owned();
        normalize_or_fallback(&f).into_inner()
    }

    /// Normalized device coordinates of a screen pixel. Screen Y grows
    /// downward, NDC Y upward.
    pub fn ndc(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            2.0 * screen_x / self.width - 1.0,
            1.0 - 2.0 * screen_y / self.height,
        )
    }

    /// World-space ray through a screen pixel.
    ///
    /// Perspective: from the unprojected near-plane point toward the
    /// unprojected far-plane point. Orthographic: from the unprojected
    /// near-plane point along [`Camera::forward`], so all rays are parallel.
    pub fn generate_ray(&self, screen_x: f64, screen_y: f64) -> Ray {
        let (ndc_x, ndc_y) = self.ndc(screen_x, screen_y);
        let near = self.unproject(Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
        if self.orthographic {
            return Ray::new(near, self.forward());
        }
        let far = self.unproject(Vector4::new(ndc_x, ndc_y, 1.0, 1.0));
        Ray::new(near, far - near)
    }

    /// Clip space to world space: inverse projection, then inverse view,
    /// dividing by `w` after each step.
    fn unproject(&self, clip: Vector4<f64>) -> Point3 {
        let eye = homogenize(self.inv_projection * clip);
        let world = homogenize(self.inv_view * eye);
        Point3::new(world.x, world.y, world.z)
    }
}

/// Positive finite width and height, with an aspect ratio nalgebra accepts.
fn check_viewport(width: f64, height: f64) -> Result<(), CameraError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    let aspect = width / height;
    if !valid(width) || !valid(height) || !valid(aspect) || aspect <= f64::EPSILON {
        return Err(CameraError::InvalidViewport { width, height });
    }
    Ok(())
}

fn check_clip_range(znear: f64, zfar: f64) -> Result<(), CameraError> {
    let depth = zfar - znear;
    if !znear.is_finite() || !zfar.is_finite() || depth.abs() <= f64::EPSILON {
        return Err(CameraError::InvalidClipRange { znear, zfar });
    }
    Ok(())
}

fn check_finite(name: &'static str, m: &Mat4) -> Result<(), CameraError> {
    if m.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CameraError::NonFiniteMatrix(name))
    }
}

fn homogenize(v: Vector4<f64>) -> Vector4<f64> {
    if v.w.abs() < Tolerance::DEFAULT.norm {
        v
    } else {
        v / v.w
    }
}
