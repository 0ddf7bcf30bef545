#![warn(missing_docs)]

//! Math types for the scenepick raycasting engine.
//!
//! Thin wrappers around nalgebra providing the domain types used by the
//! scene graph and the intersection library: points, vectors, directions,
//! rigid transforms built from Euler angles, and tolerance constants.

use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D parameter space.
pub type Point2 = nalgebra::Point2<f64>;

/// A 3x3 matrix (rotation block of a [`Transform`]).
pub type Mat3 = Matrix3<f64>;

/// A 4x4 matrix (camera view/projection).
pub type Mat4 = Matrix4<f64>;

/// Direction used when a vector is too short to normalize.
pub const FALLBACK_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation from Euler angles in degrees, applied X first, then Y, then Z
    /// (`R = Rz * Ry * Rx`).
    pub fn euler_degrees(angles: &Vec3) -> Self {
        let rx = Self::rotation_x(angles.x.to_radians());
        let ry = Self::rotation_y(angles.y.to_radians());
        let rz = Self::rotation_z(angles.z.to_radians());
        rz.then(&ry).then(&rx)
    }

    /// Local rigid transform of a scene node: Euler rotation (degrees)
    /// followed by translation to `position`.
    ///
    /// Scale is deliberately absent; shape extents are interpreted by the
    /// intersectors in the unscaled local frame.
    pub fn from_position_euler(position: &Vec3, angles_deg: &Vec3) -> Self {
        Self::translation(position.x, position.y, position.z).then(&Self::euler_degrees(angles_deg))
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// The upper-left 3x3 rotation block.
    pub fn rotation(&self) -> Mat3 {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The translation column, i.e. where the local origin lands.
    pub fn origin(&self) -> Point3 {
        Point3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Map a world point into this transform's local frame: `Rᵀ (p - origin)`.
    ///
    /// Assumes the rotation block is orthonormal.
    pub fn to_local_point(&self, p: &Point3) -> Point3 {
        Point3::from(self.rotation().transpose() * (p - self.origin()))
    }

    /// Map a world direction into this transform's local frame: `Rᵀ v`.
    pub fn to_local_vec(&self, v: &Vec3) -> Vec3 {
        self.rotation().transpose() * v
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Normalize `v`, substituting [`FALLBACK_DIRECTION`] when its norm is below
/// [`Tolerance::norm`].
pub fn normalize_or_fallback(v: &Vec3) -> Dir3 {
    if Tolerance::DEFAULT.is_degenerate(v) || !v.iter().all(|c| c.is_finite()) {
        Dir3::new_unchecked(FALLBACK_DIRECTION)
    } else {
        Dir3::new_normalize(*v)
    }
}

/// Tolerance constants for intersection tests.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// A direction component below this is treated as parallel to its axis.
    pub parallel: f64,
    /// A vector norm below this is treated as zero.
    pub norm: f64,
    /// Reciprocal substituted for a parallel direction component in slab tests.
    pub parallel_reciprocal: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 parallel, 1e-10 norm, 1e10 reciprocal).
    pub const DEFAULT: Self = Self {
        parallel: 1e-6,
        norm: 1e-10,
        parallel_reciprocal: 1e10,
    };

    /// Check if a direction component is effectively zero.
    pub fn is_parallel(&self, d: f64) -> bool {
        d.abs() < self.parallel
    }

    /// Check if a vector is too short to normalize.
    pub fn is_degenerate(&self, v: &Vec3) -> bool {
        v.norm() < self.norm
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
