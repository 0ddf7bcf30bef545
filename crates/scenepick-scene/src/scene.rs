//! The scene arena and transform resolution.

use slotmap::{new_key_type, SlotMap};

use scenepick_math::Transform;

use crate::{Node, SceneError};

new_key_type! {
    /// Generational key of a node in a [`Scene`].
    pub struct NodeId;
}

/// Deepest nesting the scene accepts and traversals will descend.
pub const MAX_DEPTH: usize = 256;

/// A hierarchy of groups and primitives.
///
/// Nodes are stored in a flat arena; parent/child links are [`NodeId`]s, so
/// there are no ownership cycles. Root order is insertion order and is the
/// order traversals visit them in.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` as the last child of `parent`, or as the last root when
    /// `parent` is `None`.
    ///
    /// The node's cached world transform is resolved immediately from the
    /// parent's current parameters.
    pub fn add_node(&mut self, parent: Option<NodeId>, mut node: Node) -> Result<NodeId, SceneError> {
        node.parent = parent;
        node.children.clear();
        let parent_world = match parent {
            Some(pid) => {
                if self.depth(pid) + 1 >= MAX_DEPTH {
                    return Err(SceneError::TooDeep(MAX_DEPTH));
                }
                self.world_transform(pid).ok_or(SceneError::UnknownNode)?
            }
            None => Transform::identity(),
        };
        node.world_transform = parent_world.then(&node.local_transform());

        let id = self.nodes.insert(node);
        match parent {
            Some(pid) => {
                if let Some(p) = self.nodes.get_mut(pid) {
                    p.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node for editing. Call [`Scene::update_world_transforms`]
    /// after changing its transform parameters.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Root nodes in visiting order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of `id`, or an empty slice if it does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of primitive (non-group) nodes.
    pub fn primitive_count(&self) -> usize {
        self.nodes.values().filter(|n| !n.is_group()).count()
    }

    /// Iterate over every node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            if depth >= MAX_DEPTH {
                break;
            }
            cur = self.parent(p);
        }
        depth
    }

    /// Resolve the local-to-world transform of `id` from current parameters
    /// by walking parent back-references: `world = parent_world · local`.
    ///
    /// Does not read or update the cache. Returns `None` if `id` is unknown.
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut cur = Some(id);
        while let Some(nid) = cur {
            let node = self.nodes.get(nid)?;
            chain.push(node.local_transform());
            if chain.len() > MAX_DEPTH {
                log::warn!("parent chain of {:?} exceeds depth {}", id, MAX_DEPTH);
                break;
            }
            cur = node.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Transform::identity(), |acc, local| acc.then(local)),
        )
    }

    /// Recompute every cached world transform, parents before children.
    pub fn update_world_transforms(&mut self) {
        let mut stack: Vec<(NodeId, Transform, usize)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, Transform::identity(), 0))
            .collect();

        while let Some((id, parent_world, depth)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                log::warn!("skipping dangling node {:?} during transform update", id);
                continue;
            };
            let world = parent_world.then(&node.local_transform());
            node.world_transform = world.clone();
            if depth + 1 >= MAX_DEPTH {
                log::warn!("not descending below {:?}: depth limit {}", id, MAX_DEPTH);
                continue;
            }
            for &child in node.children.iter().rev() {
                stack.push((child, world.clone(), depth + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveKind;
    use approx::assert_relative_eq;
    use scenepick_math::{Point3, Vec3};

    fn nested_scene() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let outer = scene
            .add_node(None, Node::group("outer").with_position(1.0, 0.0, 0.0))
            .unwrap();
        let inner = scene
            .add_node(Some(outer), Node::group("inner").with_position(0.0, 2.0, 0.0))
            .unwrap();
        let ball = scene
            .add_node(
                Some(inner),
                Node::primitive("ball", PrimitiveKind::Sphere).with_position(0.0, 0.0, 3.0),
            )
            .unwrap();
        (scene, outer, inner, ball)
    }

    #[test]
    fn test_add_links_parent_and_children() {
        let (scene, outer, inner, ball) = nested_scene();
        assert_eq!(scene.roots(), &[outer]);
        assert_eq!(scene.children(outer), &[inner]);
        assert_eq!(scene.children(inner), &[ball]);
        assert_eq!(scene.parent(ball), Some(inner));
        assert_eq!(scene.parent(outer), None);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.primitive_count(), 1);
    }

    #[test]
    fn test_world_transform_sums_translations() {
        let (scene, _, _, ball) = nested_scene();
        let world = scene.world_transform(ball).unwrap();
        assert_relative_eq!(world.origin(), Point3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
        let cached = scene.get(ball).unwrap().world_transform();
        assert_relative_eq!(cached.origin(), Point3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_parent_rotation_moves_child() {
        let mut scene = Scene::new();
        let g = scene
            .add_node(None, Node::group("g").with_rotation(0.0, 0.0, 90.0))
            .unwrap();
        let b = scene
            .add_node(Some(g), Node::primitive("b", PrimitiveKind::Box).with_position(2.0, 0.0, 0.0))
            .unwrap();
        let world = scene.world_transform(b).unwrap();
        assert_relative_eq!(world.origin(), Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(world.apply_vec(&Vec3::x()), Vec3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_cache_is_stale_until_update() {
        let (mut scene, outer, _, ball) = nested_scene();
        scene.get_mut(outer).unwrap().position = Vec3::new(10.0, 0.0, 0.0);

        let stale = scene.get(ball).unwrap().world_transform().origin();
        assert!((stale.x - 1.0).abs() < 1e-12);
        // On-demand resolution always sees current parameters.
        assert!((scene.world_transform(ball).unwrap().origin().x - 10.0).abs() < 1e-12);

        scene.update_world_transforms();
        let fresh = scene.get(ball).unwrap().world_transform().origin();
        assert_relative_eq!(fresh, Point3::new(10.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_group_size_does_not_scale_children() {
        let mut scene = Scene::new();
        let g = scene
            .add_node(None, Node::group("g").with_size(5.0, 5.0, 5.0))
            .unwrap();
        let b = scene
            .add_node(Some(g), Node::primitive("b", PrimitiveKind::Box).with_position(1.0, 0.0, 0.0))
            .unwrap();
        let world = scene.world_transform(b).unwrap();
        assert_relative_eq!(world.origin(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_parent() {
        let mut other = Scene::new();
        let foreign = other.add_node(None, Node::group("x")).unwrap();
        let mut scene = Scene::new();
        // Keys from an empty arena never resolve.
        let err = scene.add_node(Some(foreign), Node::group("y")).unwrap_err();
        assert_eq!(err, SceneError::UnknownNode);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_depth_limit() {
        let mut scene = Scene::new();
        let mut parent = scene.add_node(None, Node::group("g0")).unwrap();
        for i in 1..MAX_DEPTH {
            parent = scene.add_node(Some(parent), Node::group(format!("g{i}"))).unwrap();
        }
        let err = scene.add_node(Some(parent), Node::group("too-deep")).unwrap_err();
        assert_eq!(err, SceneError::TooDeep(MAX_DEPTH));
    }
}
