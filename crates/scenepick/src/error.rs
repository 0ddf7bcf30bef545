//! Error types for the picking entry point.

use scenepick_raytrace::CameraError;
use thiserror::Error;

/// Errors surfaced by [`crate::Raycaster`] and [`crate::CameraConfig`].
///
/// All variants are configuration faults; none are transient.
#[derive(Error, Debug)]
pub enum PickError {
    /// A required camera field was absent.
    #[error("Camera config is missing `{0}`")]
    MissingField(&'static str),

    /// Viewport must have 2 (`w, h`) or 4 (`x, y, w, h`) entries.
    #[error("Viewport must have 2 or 4 entries, got {0}")]
    ViewportArity(usize),

    /// A matrix field did not have 16 entries.
    #[error("Matrix `{field}` must have 16 entries, got {len}")]
    MatrixArity {
        /// Name of the offending field.
        field: &'static str,
        /// Number of entries supplied.
        len: usize,
    },

    /// The camera matrices or viewport are unusable.
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// A screen-space cast was requested before any camera was set.
    #[error("No camera configured")]
    NoCamera,

    /// TOML parse failure.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
