//! Camera configuration as supplied by the host application.

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use scenepick_math::{Mat4, Point3};
use scenepick_raytrace::Camera;

use crate::PickError;

/// Unvalidated camera description.
///
/// Every field is optional at the serialization layer so that an incomplete
/// config parses and is then rejected by [`CameraConfig::validate`] with the
/// name of the missing field.
///
/// Matrices are 16 floats in column-major order. `viewport` is either
/// `[width, height]` or `[x, y, width, height]`.
///
/// ```toml
/// position = [0.0, 0.0, 5.0]
/// view = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -5.0, 1.0]
/// projection = [...]
/// viewport = [0, 0, 800, 600]
/// orthographic = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// World-space eye position.
    pub position: Option<[f64; 3]>,
    /// World-to-view matrix, column-major.
    pub view: Option<Vec<f64>>,
    /// View-to-clip matrix, column-major.
    pub projection: Option<Vec<f64>>,
    /// `[w, h]` or `[x, y, w, h]` in pixels.
    pub viewport: Option<Vec<f64>>,
    /// Parallel projection flag.
    pub orthographic: Option<bool>,
}

impl CameraConfig {
    /// Parse from a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, PickError> {
        Ok(toml::from_str(text)?)
    }

    /// Parse from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, PickError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, PickError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the eye position.
    pub fn with_position(mut self, position: Point3) -> Self {
        self.position = Some([position.x, position.y, position.z]);
        self
    }

    /// Set the view matrix.
    pub fn with_view(mut self, view: &Mat4) -> Self {
        self.view = Some(view.as_slice().to_vec());
        self
    }

    /// Set the projection matrix.
    pub fn with_projection(mut self, projection: &Mat4) -> Self {
        self.projection = Some(projection.as_slice().to_vec());
        self
    }

    /// Set the viewport as `[w, h]` or `[x, y, w, h]`.
    pub fn with_viewport(mut self, viewport: &[f64]) -> Self {
        self.viewport = Some(viewport.to_vec());
        self
    }

    /// Set the projection mode.
    pub fn with_orthographic(mut self, orthographic: bool) -> Self {
        self.orthographic = Some(orthographic);
        self
    }

    /// Viewport normalized to `(width, height)`.
    pub fn viewport_size(&self) -> Result<(f64, f64), PickError> {
        let viewport = self
            .viewport
            .as_deref()
            .ok_or(PickError::MissingField("viewport"))?;
        match *viewport {
            [w, h] | [_, _, w, h] => Ok((w, h)),
            _ => Err(PickError::ViewportArity(viewport.len())),
        }
    }

    /// Check that every field is present and well-formed and build a
    /// [`Camera`] from it.
    pub fn validate(&self) -> Result<Camera, PickError> {
        let position = self.position.ok_or(PickError::MissingField("position"))?;
        let view = matrix("view", self.view.as_deref())?;
        let projection = matrix("projection", self.projection.as_deref())?;
        let (width, height) = self.viewport_size()?;
        let orthographic = self
            .orthographic
            .ok_or(PickError::MissingField("orthographic"))?;

        Ok(Camera::new(
            Point3::from(position),
            view,
            projection,
            width,
            height,
            orthographic,
        )?)
    }
}

impl From<&Camera> for CameraConfig {
    fn from(camera: &Camera) -> Self {
        let (width, height) = camera.viewport();
        CameraConfig::default()
            .with_position(camera.position())
            .with_view(camera.view())
            .with_projection(camera.projection())
            .with_viewport(&[width, height])
            .with_orthographic(camera.is_orthographic())
    }
}

fn matrix(field: &'static str, values: Option<&[f64]>) -> Result<Mat4, PickError> {
    let values = values.ok_or(PickError::MissingField(field))?;
    if values.len() != 16 {
        return Err(PickError::MatrixArity {
            field,
            len: values.len(),
        });
    }
    Ok(Matrix4::from_column_slice(values))
}
