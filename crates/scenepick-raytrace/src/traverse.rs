//! Scene traversal and nearest-hit selection.
//!
//! Every primitive in the tree is tested (no spatial index); scenes are
//! editor-sized. World transforms are composed on the way down from the
//! nodes' current parameters, so the cached [`scenepick_scene::Node::world_transform`]
//! does not need to be fresh.
//!
//! Visiting order at each level: groups first (recursively), then
//! primitives, each in list order. A candidate replaces the running best
//! only when strictly nearer, so equal distances keep the first one found.

use scenepick_math::{normalize_or_fallback, Transform};
use scenepick_scene::{Node, NodeId, Scene, MAX_DEPTH};

use crate::intersect::{intersect_primitive, LocalHit};
use crate::uv::compute_uv;
use crate::{Ray, RayHit};

/// A primitive hit before UV and world-space details are derived.
struct Candidate {
    node: NodeId,
    world: Transform,
    local: LocalHit,
}

/// Nearest primitive hit by `ray`, or `None`.
pub fn cast(scene: &Scene, ray: &Ray) -> Option<RayHit> {
    let mut best: Option<Candidate> = None;
    visit(scene, ray, &mut |candidate| {
        let nearer = best
            .as_ref()
            .map_or(true, |b| candidate.local.t < b.local.t);
        if nearer {
            best = Some(candidate);
        }
    });
    let hit = best.and_then(|c| finish(scene, ray, c));
    if let Some(h) = &hit {
        log::debug!("ray hit {:?} ({}) at distance {}", h.node, h.shape, h.distance);
    }
    hit
}

/// Every primitive hit by `ray` (each primitive's nearest hit), sorted by
/// distance. Equal distances keep visiting order.
pub fn trace_all(scene: &Scene, ray: &Ray) -> Vec<RayHit> {
    let mut candidates = Vec::new();
    visit(scene, ray, &mut |candidate| candidates.push(candidate));
    let mut hits: Vec<RayHit> = candidates
        .into_iter()
        .filter_map(|c| finish(scene, ray, c))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn visit(scene: &Scene, ray: &Ray, on_hit: &mut dyn FnMut(Candidate)) {
    visit_level(scene, scene.roots(), &Transform::identity(), ray, 0, on_hit);
}

fn visit_level(
    scene: &Scene,
    ids: &[NodeId],
    parent_world: &Transform,
    ray: &Ray,
    depth: usize,
    on_hit: &mut dyn FnMut(Candidate),
) {
    if depth >= MAX_DEPTH {
        log::warn!("hierarchy deeper than {} levels, not descending further", MAX_DEPTH);
        return;
    }

    let nodes: Vec<(NodeId, &Node)> = ids
        .iter()
        .filter_map(|&id| match scene.get(id) {
            Some(node) if node.has_finite_parameters() => Some((id, node)),
            Some(node) => {
                log::warn!("skipping node {:?} ({}) with non-finite transform", id, node.name);
                None
            }
            None => {
                log::warn!("skipping dangling node reference {:?}", id);
                None
            }
        })
        .collect();

    for &(_, node) in nodes.iter().filter(|(_, n)| n.is_group()) {
        let world = parent_world.then(&node.local_transform());
        visit_level(scene, node.children(), &world, ray, depth + 1, on_hit);
    }

    for &(id, node) in nodes.iter().filter(|(_, n)| !n.is_group()) {
        let world = parent_world.then(&node.local_transform());
        if let Some(shape) = node.shape() {
            let local_ray = ray.to_local(&world);
            if let Some(local) = intersect_primitive(&local_ray, shape, &node.size) {
                if local.t > 0.0 && local.t.is_finite() {
                    log::trace!("candidate {:?} ({}) at t = {}", id, shape, local.t);
                    on_hit(Candidate {
                        node: id,
                        world: world.clone(),
                        local,
                    });
                }
            }
        }
        if !node.children().is_empty() {
            visit_level(scene, node.children(), &world, ray, depth + 1, on_hit);
        }
    }
}

fn finish(scene: &Scene, ray: &Ray, candidate: Candidate) -> Option<RayHit> {
    let node = scene.get(candidate.node)?;
    let shape = node.shape()?;
    let local_point = candidate.local.point;
    Some(RayHit {
        node: candidate.node,
        shape,
        distance: candidate.local.t,
        world_point: ray.at(candidate.local.t),
        local_point,
        normal: normalize_or_fallback(&candidate.world.apply_vec(&candidate.local.normal)),
        uv: compute_uv(shape, &local_point, &node.size),
        ray: *ray,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scenepick_math::{Point3, Vec3};
    use scenepick_scene::PrimitiveKind;

    fn down_z(x: f64, y: f64) -> Ray {
        Ray::new(Point3::new(x, y, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        assert!(cast(&scene, &down_z(0.0, 0.0)).is_none());
        assert!(trace_all(&scene, &down_z(0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_unit_box_at_origin() {
        let mut scene = Scene::new();
        let id = scene
            .add_node(None, Node::primitive("box", PrimitiveKind::Box))
            .unwrap();
        let hit = cast(&scene, &down_z(0.0, 0.0)).unwrap();
        assert_eq!(hit.node, id);
        assert!((hit.distance - 4.0).abs() < 1e-10);
        assert_relative_eq!(hit.world_point, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-10);
        assert_relative_eq!(hit.normal.into_inner(), Vec3::z(), epsilon = 1e-10);
        assert!((hit.uv.x - 0.5).abs() < 1e-10);
        assert!((hit.uv.y - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_rotated_box_local_point() {
        let mut scene = Scene::new();
        scene
            .add_node(
                None,
                Node::primitive("slab", PrimitiveKind::Box)
                    .with_size(3.0, 1.0, 0.5)
                    .with_rotation(0.0, 90.0, 0.0),
            )
            .unwrap();
        // After 90° about Y the local X axis points along world -Z.
        let hit = cast(&scene, &down_z(0.0, 0.0)).unwrap();
        assert!((hit.world_point.z - 3.0).abs() < 1e-10);
        assert!((hit.local_point.x.abs() - 3.0).abs() < 1e-10);
        assert_relative_eq!(hit.normal.into_inner(), Vec3::z(), epsilon = 1e-10);
    }

    #[test]
    fn test_nearest_of_two_spheres_any_order() {
        for order in [[0.0, 2.0], [2.0, 0.0]] {
            let mut scene = Scene::new();
            let mut near = None;
            for z in order {
                let id = scene
                    .add_node(
                        None,
                        Node::primitive("ball", PrimitiveKind::Sphere)
                            .with_position(0.0, 0.0, z)
                            .with_size(1.5, 1.5, 1.5),
                    )
                    .unwrap();
                if z == 2.0 {
                    near = Some(id);
                }
            }
            let hit = cast(&scene, &down_z(0.0, 0.0)).unwrap();
            assert_eq!(Some(hit.node), near);
            assert!((hit.distance - 1.5).abs() < 1e-10);
        }
    }

    #[test]
    fn test_tie_keeps_first_found() {
        let mut scene = Scene::new();
        let first = scene
            .add_node(None, Node::primitive("a", PrimitiveKind::Sphere))
            .unwrap();
        scene
            .add_node(None, Node::primitive("b", PrimitiveKind::Sphere))
            .unwrap();
        let hit = cast(&scene, &down_z(0.0, 0.0)).unwrap();
        assert_eq!(hit.node, first);
    }

    #[test]
    fn test_groups_visited_before_sibling_primitives() {
        let mut scene = Scene::new();
        scene
            .add_node(None, Node::primitive("top", PrimitiveKind::Sphere))
            .unwrap();
        let g = scene.add_node(None, Node::group("g")).unwrap();
        let nested = scene
            .add_node(Some(g), Node::primitive("nested", PrimitiveKind::Sphere))
            .unwrap();
        let hit = cast(&scene, &down_z(0.0, 0.0)).unwrap();
        assert_eq!(hit.node, nested);
    }

    #[test]
    fn test_nested_group_translations_compose() {
        let mut scene = Scene::new();
        let outer = scene
            .add_node(None, Node::group("outer").with_position(3.0, 0.0, 0.0))
            .unwrap();
        let inner = scene
            .add_node(Some(outer), Node::group("inner").with_position(0.0, -2.0, 0.0))
            .unwrap();
        let ball = scene
            .add_node(
                Some(inner),
                Node::primitive("ball", PrimitiveKind::Sphere)
                    .with_position(1.0, 1.0, 0.0)
                    .with_size(0.5, 0.5, 0.5),
            )
            .unwrap();

        let hit = cast(&scene, &down_z(4.0, -1.0)).unwrap();
        assert_eq!(hit.node, ball);
        assert_relative_eq!(hit.world_point, Point3::new(4.0, -1.0, 0.5), epsilon = 1e-10);
        assert_relative_eq!(hit.local_point, Point3::new(0.0, 0.0, 0.5), epsilon = 1e-10);

        assert!(cast(&scene, &down_z(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_edits_seen_without_cache_refresh() {
        let mut scene = Scene::new();
        let g = scene.add_node(None, Node::group("g")).unwrap();
        scene
            .add_node(Some(g), Node::primitive("box", PrimitiveKind::Box))
            .unwrap();
        scene.get_mut(g).unwrap().position = Vec3::new(10.0, 0.0, 0.0);
        assert!(cast(&scene, &down_z(0.0, 0.0)).is_none());
        assert!(cast(&scene, &down_z(10.0, 0.0)).is_some());
    }

    #[test]
    fn test_non_finite_node_is_skipped() {
        let mut scene = Scene::new();
        let bad = scene
            .add_node(None, Node::primitive("bad", PrimitiveKind::Sphere).with_position(0.0, 0.0, 3.0))
            .unwrap();
        let good = scene
            .add_node(None, Node::primitive("good", PrimitiveKind::Sphere))
            .unwrap();
        scene.get_mut(bad).unwrap().size.x = f64::NAN;
        let hit = cast(&scene, &down_z(0.0, 0.0)).unwrap();
        assert_eq!(hit.node, good);
    }

    #[test]
    fn test_group_with_non_finite_size_still_descends() {
        let mut scene = Scene::new();
        let g = scene.add_node(None, Node::group("g")).unwrap();
        let ball = scene
            .add_node(Some(g), Node::primitive("ball", PrimitiveKind::Sphere))
            .unwrap();
        scene.get_mut(g).unwrap().size = Vec3::new(f64::NAN, 1.0, f64::INFINITY);
        assert_eq!(cast(&scene, &down_z(0.0, 0.0)).unwrap().node, ball);

        scene.get_mut(g).unwrap().position.x = f64::NAN;
        assert!(cast(&scene, &down_z(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_trace_all_sorted() {
        let mut scene = Scene::new();
        let far = scene
            .add_node(None, Node::primitive("far", PrimitiveKind::Box).with_position(0.0, 0.0, -3.0))
            .unwrap();
        let near = scene
            .add_node(None, Node::primitive("near", PrimitiveKind::Plane).with_position(0.0, 0.0, 2.0))
            .unwrap();
        let hits = trace_all(&scene, &down_z(0.0, 0.0));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert_eq!(hits[1].node, far);
        assert!((hits[0].distance - 3.0).abs() < 1e-10);
        assert!((hits[1].distance - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_origin_inside_reports_exit() {
        let mut scene = Scene::new();
        scene
            .add_node(None, Node::primitive("room", PrimitiveKind::Box).with_size(10.0, 10.0, 10.0))
            .unwrap();
        let ray = Ray::new(Point3::origin(), Vec3::x());
        let hit = cast(&scene, &ray).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_cast_is_deterministic() {
        let mut scene = Scene::new();
        scene
            .add_node(
                None,
                Node::primitive("cap", PrimitiveKind::Capsule)
                    .with_rotation(20.0, 35.0, -10.0)
                    .with_size(0.7, 1.3, 0.0),
            )
            .unwrap();
        let ray = Ray::new(Point3::new(0.3, 0.2, 6.0), Vec3::new(-0.05, 0.0, -1.0));
        let a = cast(&scene, &ray).unwrap();
        let b = cast(&scene, &ray).unwrap();
        assert_eq!(a, b);
    }
}
