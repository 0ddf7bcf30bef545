//! The picking entry point.

use std::sync::Arc;

use scenepick_raytrace::{traverse, Camera, Ray, RayHit};
use scenepick_scene::Scene;

use crate::{CameraConfig, PickError};

/// Holds the current camera and scene snapshot and answers pick queries.
///
/// Queries never mutate the scene. The scene is shared via [`Arc`]; the
/// caller must not hand in a new snapshot while a query is running (a single
/// UI thread satisfies this trivially).
#[derive(Debug, Clone, Default)]
pub struct Raycaster {
    camera: Option<Camera>,
    scene: Option<Arc<Scene>>,
}

impl Raycaster {
    /// Create a raycaster with no camera and no scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `config` and make it the current camera.
    ///
    /// On error the previous camera (if any) stays in effect.
    pub fn update_camera(&mut self, config: &CameraConfig) -> Result<(), PickError> {
        match config.validate() {
            Ok(camera) => {
                log::debug!(
                    "camera updated: viewport {:?}, orthographic {}",
                    camera.viewport(),
                    camera.is_orthographic()
                );
                self.camera = Some(camera);
                Ok(())
            }
            Err(e) => {
                log::warn!("rejected camera config: {}", e);
                Err(e)
            }
        }
    }

    /// Install an already-validated camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    /// Replace the scene snapshot used by subsequent queries.
    pub fn update_scene(&mut self, scene: Arc<Scene>) {
        log::debug!(
            "scene updated: {} roots, {} primitives",
            scene.roots().len(),
            scene.primitive_count()
        );
        self.scene = Some(scene);
    }

    /// Current camera.
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Current scene snapshot.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_deref()
    }

    /// World-space ray through a screen pixel of the current camera.
    pub fn screen_ray(&self, screen_x: f64, screen_y: f64) -> Result<Ray, PickError> {
        let camera = self.camera.as_ref().ok_or(PickError::NoCamera)?;
        Ok(camera.generate_ray(screen_x, screen_y))
    }

    /// Nearest primitive under a screen pixel.
    ///
    /// `Ok(None)` when nothing is hit or no scene has been set. Fails only
    /// if no camera has been configured.
    pub fn cast_ray(&self, screen_x: f64, screen_y: f64) -> Result<Option<RayHit>, PickError> {
        let ray = self.screen_ray(screen_x, screen_y)?;
        Ok(self.cast(&ray))
    }

    /// Nearest primitive along an explicit world-space ray.
    pub fn cast(&self, ray: &Ray) -> Option<RayHit> {
        self.scene.as_deref().and_then(|scene| traverse::cast(scene, ray))
    }

    /// Every primitive along an explicit world-space ray, nearest first.
    pub fn cast_all(&self, ray: &Ray) -> Vec<RayHit> {
        self.scene
            .as_deref()
            .map(|scene| traverse::trace_all(scene, ray))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenepick_math::{Point3, Vec3};
    use scenepick_scene::{Node, PrimitiveKind};

    fn camera() -> Camera {
        Camera::look_at_perspective(
            Point3::new(0.0, 0.0, 10.0),
            Point3::origin(),
            Vec3::y(),
            45.0,
            0.1,
            100.0,
            200.0,
            100.0,
        )
        .unwrap()
    }

    #[test]
    fn test_cast_without_camera_fails() {
        let caster = Raycaster::new();
        assert!(matches!(caster.cast_ray(0.0, 0.0), Err(PickError::NoCamera)));
    }

    #[test]
    fn test_cast_without_scene_misses() {
        let mut caster = Raycaster::new();
        caster.set_camera(camera());
        assert!(caster.cast_ray(100.0, 50.0).unwrap().is_none());
        let ray = caster.screen_ray(100.0, 50.0).unwrap();
        assert!(caster.cast_all(&ray).is_empty());
    }

    #[test]
    fn test_rejected_camera_keeps_previous() {
        let mut caster = Raycaster::new();
        caster.update_camera(&CameraConfig::from(&camera())).unwrap();
        let bad = CameraConfig::from(&camera()).with_viewport(&[1.0]);
        assert!(caster.update_camera(&bad).is_err());
        assert_eq!(caster.camera().unwrap().viewport(), (200.0, 100.0));
    }

    #[test]
    fn test_center_pixel_hits_box() {
        let mut scene = Scene::new();
        let id = scene
            .add_node(None, Node::primitive("box", PrimitiveKind::Box))
            .unwrap();
        let mut caster = Raycaster::new();
        caster.set_camera(camera());
        caster.update_scene(Arc::new(scene));

        let hit = caster.cast_ray(100.0, 50.0).unwrap().unwrap();
        assert_eq!(hit.node, id);
        assert!((hit.world_point.z - 1.0).abs() < 1e-9);
        // Ray starts on the near plane.
        assert!((hit.distance - 8.9).abs() < 1e-9);
        assert!(caster.scene().is_some());
    }
}
