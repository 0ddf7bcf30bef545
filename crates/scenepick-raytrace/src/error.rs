//! Error types for camera configuration.

use thiserror::Error;

/// Errors raised when a camera cannot produce rays.
///
/// These are configuration faults: the caller must fix the camera, retrying
/// with the same input will fail the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    /// The view matrix has no inverse.
    #[error("View matrix is singular")]
    SingularView,

    /// The projection matrix has no inverse.
    #[error("Projection matrix is singular")]
    SingularProjection,

    /// A matrix or its inverse contains NaN or infinity.
    #[error("{0} matrix has non-finite entries")]
    NonFiniteMatrix(&'static str),

    /// Near and far planes must be finite and distinct.
    #[error("Invalid clip range: near {znear}, far {zfar}")]
    InvalidClipRange {
        /// Near plane distance.
        znear: f64,
        /// Far plane distance.
        zfar: f64,
    },

    /// Lens extent (field of view or orthographic half height) is zero or
    /// not finite.
    #[error("Invalid lens extent {0}")]
    InvalidLens(f64),

    /// Viewport dimensions must be finite and positive.
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
    },
}
