//! Material and per-instance placement of the decorative boxes.

use std::sync::Arc;

use serde::Serialize;

use crate::geometry::SolidGeometry;

/// Physically based material parameters, named the way WebGL renderers
/// expect them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalMaterial {
    /// sRGB hex color.
    pub color: &'static str,
    pub metalness: f64,
    pub roughness: f64,
    pub reflectivity: f64,
    pub ior: f64,
    pub clearcoat: f64,
    pub clearcoat_roughness: f64,
    pub iridescence: f64,
    #[serde(rename = "iridescenceIOR")]
    pub iridescence_ior: f64,
    /// Thin-film thickness range in nanometres.
    pub iridescence_thickness_range: [f64; 2],
}

impl PhysicalMaterial {
    /// Near-black polished metal with a faint oil-slick sheen.
    pub const IRIDESCENT_GRAPHITE: Self = Self {
        color: "#161616",
        metalness: 1.0,
        roughness: 0.22,
        reflectivity: 0.65,
        ior: 1.35,
        clearcoat: 0.18,
        clearcoat_roughness: 0.2,
        iridescence: 0.55,
        iridescence_ior: 1.25,
        iridescence_thickness_range: [80.0, 260.0],
    };
}

impl Default for PhysicalMaterial {
    fn default() -> Self {
        Self::IRIDESCENT_GRAPHITE
    }
}

/// One renderable box: shared geometry at a fixed local transform.
///
/// Holds no state of its own; two elements built from the same inputs
/// render identically.
#[derive(Debug, Clone)]
pub struct DecorativeElement {
    pub geometry: Arc<SolidGeometry>,
    pub position: [f64; 3],
    /// Euler angles in radians, XYZ order.
    pub rotation: [f64; 3],
    pub material: PhysicalMaterial,
}

impl DecorativeElement {
    #[must_use]
    pub fn new(geometry: Arc<SolidGeometry>, position: [f64; 3], rotation: [f64; 3]) -> Self {
        Self {
            geometry,
            position,
            rotation,
            material: PhysicalMaterial::IRIDESCENT_GRAPHITE,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn material_serializes_with_renderer_names() {
        let json = serde_json::to_value(PhysicalMaterial::default()).unwrap();
        assert_eq!(json["color"], "#161616");
        assert_eq!(json["clearcoatRoughness"], 0.2);
        assert_eq!(json["iridescenceIOR"], 1.25);
        assert_eq!(json["iridescenceThicknessRange"][1], 260.0);
    }

    #[test]
    fn elements_share_geometry() {
        let geometry = Arc::new(SolidGeometry::rounded_box().unwrap());
        let a = DecorativeElement::new(Arc::clone(&geometry), [0.0; 3], [0.0; 3]);
        let b = DecorativeElement::new(Arc::clone(&geometry), [1.0, 0.0, 0.0], [0.0; 3]);
        assert!(Arc::ptr_eq(&a.geometry, &b.geometry));
        assert_eq!(a.material, b.material);
    }
}
