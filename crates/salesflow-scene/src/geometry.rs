//! Extruded rounded-square solid shared by every decorative element.
//!
//! The outline is four quarter-circle arcs joined by straight edges. It is
//! extruded along +Z with a rounded bevel on both faces, capped at each end,
//! then re-centered on its bounding box so rotations pivot around the middle
//! of the solid rather than its front face.

use std::f64::consts::FRAC_PI_2;

use serde::Serialize;
use tracing::debug;

use crate::error::GeometryError;

/// Points closer than this are treated as the same outline vertex.
const COINCIDENT_EPSILON: f64 = 1e-9;

/// Closed 2D outline built from four arcs of `radius`, centered at
/// `(±offset, ±offset)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedSquare {
    /// Distance of each arc center from both axes.
    pub offset: f64,
    /// Corner radius.
    pub radius: f64,
}

impl Default for RoundedSquare {
    fn default() -> Self {
        Self {
            offset: 2.0,
            radius: 1.0,
        }
    }
}

impl RoundedSquare {
    /// Sample the outline counter-clockwise with `segments` divisions per arc.
    ///
    /// Arcs run from 0° to 360° in quarter turns starting at the `(+, +)`
    /// corner. Consecutive arcs are joined by the implicit straight edge
    /// between the end of one and the start of the next.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if `offset` or `radius` is not a positive
    /// finite number, or if `segments` is zero.
    pub fn points(&self, segments: u32) -> Result<Vec<[f64; 2]>, GeometryError> {
        check_positive("outline offset", self.offset)?;
        check_positive("corner radius", self.radius)?;
        if segments == 0 {
            return Err(GeometryError::ZeroSegments {
                name: "curve_segments",
            });
        }

        let o = self.offset;
        let corners = [(o, o), (-o, o), (-o, -o), (o, -o)];
        let per_arc = usize::try_from(segments).unwrap_or(usize::MAX).saturating_add(1);
        let mut points: Vec<[f64; 2]> = Vec::with_capacity(per_arc.saturating_mul(4));

        for (quarter, (cx, cy)) in (0u32..).zip(corners) {
            let start = FRAC_PI_2 * f64::from(quarter);
            for s in 0..=segments {
                let angle = start + FRAC_PI_2 * f64::from(s) / f64::from(segments);
                let p = [
                    cx + self.radius * angle.cos(),
                    cy + self.radius * angle.sin(),
                ];
                if points.last().is_none_or(|q| !coincident(*q, p)) {
                    points.push(p);
                }
            }
        }

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if points.len() > 1 && coincident(*first, *last) {
                points.pop();
            }
        }

        Ok(points)
    }
}

/// Extrusion and bevel parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeSettings {
    /// Length of the straight section along +Z.
    pub depth: f64,
    /// Number of rings subdividing the straight section.
    pub steps: u32,
    /// How far each bevel extends beyond the straight section along Z.
    pub bevel_thickness: f64,
    /// How far the bevel pushes the outline outward.
    pub bevel_size: f64,
    /// Rings per bevel.
    pub bevel_segments: u32,
    /// Divisions per outline arc.
    pub curve_segments: u32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 0.32,
            steps: 1,
            bevel_thickness: 0.05,
            bevel_size: 0.05,
            bevel_segments: 12,
            curve_segments: 18,
        }
    }
}

impl ExtrudeSettings {
    /// Check every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), GeometryError> {
        check_positive("depth", self.depth)?;
        check_non_negative("bevel_thickness", self.bevel_thickness)?;
        check_non_negative("bevel_size", self.bevel_size)?;
        for (name, value) in [
            ("steps", self.steps),
            ("bevel_segments", self.bevel_segments),
            ("curve_segments", self.curve_segments),
        ] {
            if value == 0 {
                return Err(GeometryError::ZeroSegments { name });
            }
        }
        Ok(())
    }

    /// Z position and outline offset of every ring, front face first.
    fn rings(&self) -> Vec<(f64, f64)> {
        let segments = self.bevel_segments;
        let bevel = |b: u32| {
            let t = f64::from(b) / f64::from(segments) * FRAC_PI_2;
            (self.bevel_thickness * t.cos(), self.bevel_size * t.sin())
        };

        let mut rings = Vec::new();
        for b in 0..segments {
            let (dz, offset) = bevel(b);
            rings.push((-dz, offset));
        }
        for s in 0..=self.steps {
            let z = self.depth * f64::from(s) / f64::from(self.steps);
            rings.push((z, self.bevel_size));
        }
        for b in (0..segments).rev() {
            let (dz, offset) = bevel(b);
            rings.push((self.depth + dz, offset));
        }
        rings
    }
}

/// An immutable indexed triangle mesh.
///
/// Built once per mount and shared read-only by every instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolidGeometry {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Counter-clockwise (outward-facing) triangles, three indices each.
    pub indices: Vec<u32>,
}

impl SolidGeometry {
    /// The rounded box used by the hero background.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in parameters; the `Result` is carried
    /// through from [`extrude`].
    pub fn rounded_box() -> Result<Self, GeometryError> {
        extrude(&RoundedSquare::default(), &ExtrudeSettings::default())
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(mut lo, mut hi), p| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        }))
    }
}

/// Extrude `outline` along +Z with a bevel on both ends.
///
/// Every ring is a copy of the outline pushed outward along its mitered
/// vertex normals. Side walls join consecutive rings; the first and last
/// rings are closed with a triangle fan, which is valid because the
/// rounded square is convex. The finished mesh is centered on its bounding
/// box.
///
/// # Errors
///
/// Returns [`GeometryError`] if the settings or outline are invalid.
#[allow(clippy::cast_possible_truncation)]
pub fn extrude(
    outline: &RoundedSquare,
    settings: &ExtrudeSettings,
) -> Result<SolidGeometry, GeometryError> {
    settings.validate()?;
    let contour = outline.points(settings.curve_segments)?;
    let normals = miter_normals(&contour);
    let rings = settings.rings();

    let n = contour.len();
    let vertex_count = n.saturating_mul(rings.len());
    if u32::try_from(vertex_count).is_err() {
        return Err(GeometryError::TooManyVertices {
            vertices: vertex_count,
        });
    }

    let mut positions: Vec<[f64; 3]> = Vec::with_capacity(vertex_count);
    for &(z, offset) in &rings {
        for (p, m) in contour.iter().zip(&normals) {
            positions.push([p[0] + m[0] * offset, p[1] + m[1] * offset, z]);
        }
    }

    // Fits in u32: checked against `vertex_count` above.
    let vertex = |ring: usize, i: usize| (ring * n + i % n) as u32;

    let mut indices: Vec<u32> = Vec::new();
    for ring in 0..rings.len().saturating_sub(1) {
        for i in 0..n {
            let a = vertex(ring, i);
            let b = vertex(ring, i + 1);
            let c = vertex(ring + 1, i + 1);
            let d = vertex(ring + 1, i);
            indices.extend_from_slice(&[a, b, c]);
            indices.extend_from_slice(&[a, c, d]);
        }
    }

    let last = rings.len().saturating_sub(1);
    for i in 1..n.saturating_sub(1) {
        // Front cap faces -Z, back cap faces +Z.
        indices.extend_from_slice(&[vertex(0, 0), vertex(0, i + 1), vertex(0, i)]);
        indices.extend_from_slice(&[vertex(last, 0), vertex(last, i), vertex(last, i + 1)]);
    }

    let geometry = SolidGeometry {
        positions: center(&positions),
        indices,
    };

    debug!(
        vertices = geometry.vertex_count(),
        triangles = geometry.triangle_count(),
        "built extruded solid"
    );

    Ok(geometry)
}

/// Translate `positions` so their bounding box is centered on the origin.
#[allow(clippy::cast_possible_truncation)]
fn center(positions: &[[f64; 3]]) -> Vec<[f32; 3]> {
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for p in positions {
        for axis in 0..3 {
            lo[axis] = lo[axis].min(p[axis]);
            hi[axis] = hi[axis].max(p[axis]);
        }
    }
    let mid = [
        (lo[0] + hi[0]) / 2.0,
        (lo[1] + hi[1]) / 2.0,
        (lo[2] + hi[2]) / 2.0,
    ];

    positions
        .iter()
        .map(|p| {
            [
                (p[0] - mid[0]) as f32,
                (p[1] - mid[1]) as f32,
                (p[2] - mid[2]) as f32,
            ]
        })
        .collect()
}

/// Per-vertex offset directions that keep every edge of an outset outline
/// parallel to the original at distance 1.
fn miter_normals(contour: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let cur = contour[i];
            let next = contour[(i + 1) % n];

            let a = outward_normal(prev, cur);
            let b = outward_normal(cur, next);
            let sum = [a[0] + b[0], a[1] + b[1]];
            let len = sum[0].hypot(sum[1]);
            if len <= f64::EPSILON {
                return b;
            }
            let m = [sum[0] / len, sum[1] / len];
            let cos = m[0] * b[0] + m[1] * b[1];
            [m[0] / cos, m[1] / cos]
        })
        .collect()
}

/// Unit normal pointing out of a counter-clockwise outline.
fn outward_normal(from: [f64; 2], to: [f64; 2]) -> [f64; 2] {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let len = dx.hypot(dy);
    [dy / len, -dx / len]
}

fn coincident(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() < COINCIDENT_EPSILON && (a[1] - b[1]).abs() < COINCIDENT_EPSILON
}

fn check_positive(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter {
            name,
            value,
            requirement: "greater than zero",
        })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter {
            name,
            value,
            requirement: "zero or greater",
        })
    }
}
