#![warn(missing_docs)]

//! scenepick: click-to-select for hierarchical primitive scenes.
//!
//! Converts a screen position into a world ray through the current camera,
//! walks the scene graph, and reports the nearest primitive hit together
//! with its world/local hit points, surface normal, and UV coordinates.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scenepick::{CameraConfig, Node, PrimitiveKind, Raycaster, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_node(None, Node::primitive("crate", PrimitiveKind::Box)).unwrap();
//!
//! let camera = CameraConfig::from_toml(&std::fs::read_to_string("camera.toml").unwrap()).unwrap();
//!
//! let mut caster = Raycaster::new();
//! caster.update_scene(Arc::new(scene));
//! caster.update_camera(&camera).unwrap();
//!
//! if let Some(hit) = caster.cast_ray(400.0, 300.0).unwrap() {
//!     println!("picked {:?} at {}", hit.node, hit.distance);
//! }
//! ```

mod caster;
mod config;
mod error;

pub use caster::Raycaster;
pub use config::CameraConfig;
pub use error::PickError;

pub use scenepick_math::{Dir3, Point2, Point3, Transform, Vec3};
pub use scenepick_raytrace::{Camera, CameraError, Ray, RayHit};
pub use scenepick_scene::{Material, Node, NodeId, NodeKind, PrimitiveKind, Scene, SceneError};
