//! Camera, lights, and overlay around the animated field.
//!
//! The host is declarative. [`SceneHost::describe`] flattens everything a
//! browser renderer needs into one serializable [`SceneDescriptor`].

use std::sync::Arc;

use serde::Serialize;

use crate::error::GeometryError;
use crate::field::{AnimatedField, FieldInstance, Motion, DEFAULT_COUNT};
use crate::geometry::SolidGeometry;
use crate::material::PhysicalMaterial;

/// Perspective camera looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub position: [f64; 3],
    /// Vertical field of view in degrees.
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [5.0, 5.0, 20.0],
            fov: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Light {
    Ambient { intensity: f64 },
    Directional { position: [f64; 3], intensity: f64 },
    Point { position: [f64; 3], intensity: f64 },
}

impl Light {
    /// Bright ambient fill, a key light from the upper right, and a point
    /// light from the upper left.
    #[must_use]
    pub fn studio_rig() -> Vec<Self> {
        vec![
            Self::Ambient { intensity: 1.15 },
            Self::Directional {
                position: [10.0, 10.0, 5.0],
                intensity: 2.2,
            },
            Self::Point {
                position: [-8.0, 6.0, 10.0],
                intensity: 1.4,
            },
        ]
    }
}

/// White vertical gradient laid over the canvas so hero text stays legible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Opacity at the top, middle, and bottom.
    pub stops: [f64; 3],
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            stops: [0.88, 0.74, 0.92],
        }
    }
}

impl Overlay {
    /// CSS `background` value for the overlay element.
    #[must_use]
    pub fn css(&self) -> String {
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|alpha| format!("rgba(255,255,255,{alpha})"))
            .collect();
        format!("linear-gradient(to bottom, {})", stops.join(", "))
    }
}

impl Serialize for Overlay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Overlay", 2)?;
        s.serialize_field("background", &self.css())?;
        // The overlay must never swallow clicks meant for the form.
        s.serialize_field("pointerEvents", "none")?;
        s.end()
    }
}

/// Everything the page's renderer needs, in one JSON-friendly value.
#[derive(Debug, Clone, Serialize)]
pub struct SceneDescriptor {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub material: PhysicalMaterial,
    pub geometry: Arc<SolidGeometry>,
    pub instances: Vec<FieldInstance>,
    pub motion: Motion,
    pub overlay: Overlay,
}

/// Owns the camera, lights, overlay, and the animated field.
#[derive(Debug)]
pub struct SceneHost {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub overlay: Overlay,
    field: AnimatedField,
}

impl SceneHost {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            camera: Camera::default(),
            lights: Light::studio_rig(),
            overlay: Overlay::default(),
            field: AnimatedField::new(count),
        }
    }

    #[must_use]
    pub fn field(&self) -> &AnimatedField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut AnimatedField {
        &mut self.field
    }

    /// Snapshot of the scene for a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the shared solid cannot be built.
    pub fn describe(&self) -> Result<SceneDescriptor, GeometryError> {
        Ok(SceneDescriptor {
            camera: self.camera,
            lights: self.lights.clone(),
            material: PhysicalMaterial::IRIDESCENT_GRAPHITE,
            geometry: self.field.geometry()?,
            instances: self.field.instances().to_vec(),
            motion: self.field.motion(),
            overlay: self.overlay,
        })
    }
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT)
    }
}
