#![warn(missing_docs)]

//! Analytic ray casting against a scene of transformed primitives.
//!
//! Rays are intersected exactly with each primitive's surface in the
//! primitive's own frame; no tessellation or acceleration structure is
//! involved.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and unit direction
//! - [`Camera`] - Screen-to-world ray generation from view/projection matrices
//! - [`intersect`] - Ray-solid intersection for each primitive kind
//! - [`uv`] - Surface parameterization of hit points
//! - [`traverse`] - Hierarchy walk and nearest-hit selection
//!
//! # Example
//!
//! ```ignore
//! use scenepick_raytrace::{traverse, Ray};
//! use scenepick_scene::{Node, PrimitiveKind, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_node(None, Node::primitive("crate", PrimitiveKind::Box))?;
//!
//! let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
//! let hit = traverse::cast(&scene, &ray).unwrap();
//! assert!((hit.distance - 4.0).abs() < 1e-12);
//! ```

mod camera;
mod error;
mod ray;
pub mod intersect;
pub mod traverse;
pub mod uv;

pub use camera::Camera;
pub use error::CameraError;
pub use ray::{Ray, RayHit};
