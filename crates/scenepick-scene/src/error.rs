//! Error types for scene graph construction.

use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The referenced node does not exist in the arena.
    #[error("Node not found in scene")]
    UnknownNode,

    /// A type tag did not name a known primitive.
    #[error("Unknown primitive type: {0}")]
    UnknownPrimitive(String),

    /// Attaching the node would nest it deeper than the supported limit.
    #[error("Hierarchy depth limit of {0} exceeded")]
    TooDeep(usize),
}
