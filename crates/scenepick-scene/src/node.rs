//! Scene node types: groups and primitives.

use std::fmt;
use std::str::FromStr;

use scenepick_math::{Transform, Vec3};

use crate::scene::NodeId;
use crate::SceneError;

/// The solid shape of a primitive node.
///
/// Size-vector semantics per kind:
///
/// | Kind | `size.x` | `size.y` | `size.z` |
/// |---|---|---|---|
/// | `Box` | half-extent X | half-extent Y | half-extent Z |
/// | `Sphere` | radius | ignored | ignored |
/// | `Cylinder` | radius | half-height | ignored |
/// | `Capsule` | radius | half-height of the straight section | ignored |
/// | `Plane` | half-width | half-height | ignored |
/// | `Ellipsoid` | radius X | radius Y | radius Z |
///
/// Cylinders and capsules run along local Z. Planes lie in local XY with
/// their front face toward +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Rectangular box.
    Box,
    /// Sphere.
    Sphere,
    /// Flat-capped cylinder.
    Cylinder,
    /// Cylinder with hemispherical caps.
    Capsule,
    /// Finite, infinitely thin rectangle.
    Plane,
    /// Axis-aligned ellipsoid.
    Ellipsoid,
}

impl PrimitiveKind {
    /// All kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Box,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Capsule,
        PrimitiveKind::Plane,
        PrimitiveKind::Ellipsoid,
    ];

    /// Lowercase type tag (`"box"`, `"sphere"`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            PrimitiveKind::Box => "box",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Capsule => "capsule",
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Ellipsoid => "ellipsoid",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PrimitiveKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        PrimitiveKind::ALL
            .into_iter()
            .find(|k| k.tag() == lower)
            .ok_or_else(|| SceneError::UnknownPrimitive(s.to_string()))
    }
}

/// Surface appearance of a primitive. Carried for collaborators; the
/// raycaster never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color as `[r, g, b, a]` in 0.0..1.0.
    pub rgba: [f64; 4],
}

impl Material {
    /// Create a material from an RGBA color.
    pub fn new(rgba: [f64; 4]) -> Self {
        Self { rgba }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            rgba: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

/// What a node is: a pure transform container, or a solid.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Composes transforms for its children; has no geometry.
    Group,
    /// A solid that rays can hit.
    Primitive {
        /// Shape of the solid.
        shape: PrimitiveKind,
        /// Appearance.
        material: Material,
    },
}

/// A node in the scene graph.
///
/// `position`, `rotation` and `size` are public so editors can change them
/// in place. The cached [`Node::world_transform`] goes stale on any such edit
/// (to this node or an ancestor) until [`crate::Scene::update_world_transforms`]
/// runs again.
#[derive(Debug, Clone)]
pub struct Node {
    /// Human-readable name.
    pub name: String,
    /// Group or primitive.
    pub kind: NodeKind,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Euler angles in degrees relative to the parent, applied X, Y, then Z.
    pub rotation: Vec3,
    /// Shape extents; see [`PrimitiveKind`]. Cosmetic on groups.
    pub size: Vec3,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) world_transform: Transform,
}

impl Node {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            size: Vec3::new(1.0, 1.0, 1.0),
            parent: None,
            children: Vec::new(),
            world_transform: Transform::identity(),
        }
    }

    /// Create an empty group at the origin.
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    /// Create a unit-sized primitive at the origin with the default material.
    pub fn primitive(name: impl Into<String>, shape: PrimitiveKind) -> Self {
        Self::with_kind(
            name,
            NodeKind::Primitive {
                shape,
                material: Material::default(),
            },
        )
    }

    /// Set the local position.
    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Set the local Euler rotation in degrees.
    pub fn with_rotation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    /// Set the size vector.
    pub fn with_size(mut self, x: f64, y: f64, z: f64) -> Self {
        self.size = Vec3::new(x, y, z);
        self
    }

    /// Set the material. No effect on groups.
    pub fn with_material(mut self, material: Material) -> Self {
        if let NodeKind::Primitive { material: m, .. } = &mut self.kind {
            *m = material;
        }
        self
    }

    /// The primitive shape, or `None` for groups.
    pub fn shape(&self) -> Option<PrimitiveKind> {
        match self.kind {
            NodeKind::Primitive { shape, .. } => Some(shape),
            NodeKind::Group => None,
        }
    }

    /// The material, or `None` for groups.
    pub fn material(&self) -> Option<&Material> {
        match &self.kind {
            NodeKind::Primitive { material, .. } => Some(material),
            NodeKind::Group => None,
        }
    }

    /// True for group nodes.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }

    /// Parent back-reference.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local rigid transform: rotation `Rz·Ry·Rx` then translation.
    pub fn local_transform(&self) -> Transform {
        Transform::from_position_euler(&self.position, &self.rotation)
    }

    /// Cached local-to-world transform, valid as of the last
    /// [`crate::Scene::update_world_transforms`].
    pub fn world_transform(&self) -> &Transform {
        &self.world_transform
    }

    /// True when the parameters traversal relies on contain no NaN or
    /// infinity: position and rotation always, size only for primitives.
    pub fn has_finite_parameters(&self) -> bool {
        let finite = |v: &Vec3| v.iter().all(|c| c.is_finite());
        finite(&self.position) && finite(&self.rotation) && (self.is_group() || finite(&self.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_roundtrip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(kind.tag().parse::<PrimitiveKind>().unwrap(), kind);
        }
        assert_eq!("  Ellipsoid ".parse::<PrimitiveKind>().unwrap(), PrimitiveKind::Ellipsoid);
    }

    #[test]
    fn test_unknown_tag() {
        let err = "torus".parse::<PrimitiveKind>().unwrap_err();
        assert_eq!(err, SceneError::UnknownPrimitive("torus".to_string()));
    }

    #[test]
    fn test_group_has_no_shape() {
        let g = Node::group("g").with_material(Material::new([1.0, 0.0, 0.0, 1.0]));
        assert!(g.is_group());
        assert!(g.shape().is_none());
        assert!(g.material().is_none());
    }

    #[test]
    fn test_primitive_builder() {
        let n = Node::primitive("ball", PrimitiveKind::Sphere)
            .with_position(1.0, 2.0, 3.0)
            .with_size(0.5, 0.5, 0.5)
            .with_material(Material::new([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(n.shape(), Some(PrimitiveKind::Sphere));
        assert_eq!(n.material().unwrap().rgba, [0.0, 1.0, 0.0, 1.0]);
        assert!((n.local_transform().origin().y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_parameters() {
        let mut n = Node::primitive("bad", PrimitiveKind::Box);
        assert!(n.has_finite_parameters());
        n.size.y = f64::NAN;
        assert!(!n.has_finite_parameters());
    }

    #[test]
    fn test_group_size_is_ignored() {
        let mut g = Node::group("g");
        g.size.x = f64::NAN;
        assert!(g.has_finite_parameters());
        g.rotation.z = f64::INFINITY;
        assert!(!g.has_finite_parameters());
    }
}
