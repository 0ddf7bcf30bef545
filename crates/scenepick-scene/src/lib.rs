#![warn(missing_docs)]

//! Scene graph for the scenepick raycasting engine.
//!
//! Nodes live in a flat [`slotmap`] arena and refer to each other by
//! [`NodeId`]: a parent owns its ordered child list, a child keeps a
//! non-owning back-reference to its parent. Each node carries a local
//! position, Euler rotation (degrees), and a size vector whose meaning
//! depends on the node's [`PrimitiveKind`].
//!
//! - [`Node`] - A group or primitive with local transform parameters
//! - [`Scene`] - The arena plus the ordered list of root nodes
//! - [`Scene::world_transform`] - On-demand transform resolution
//! - [`Scene::update_world_transforms`] - Refresh cached transforms top-down

mod error;
mod node;
mod scene;

pub use error::SceneError;
pub use node::{Material, Node, NodeKind, PrimitiveKind};
pub use scene::{NodeId, Scene, MAX_DEPTH};
