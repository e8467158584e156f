//! Error types for `salesflow-scene`.

/// Errors from building the extruded solid.
///
/// The built-in rounded box never produces these; they guard custom
/// [`ExtrudeSettings`](crate::ExtrudeSettings) and outlines.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A length parameter was NaN, infinite, or out of range.
    #[error("invalid {name}: {value} (must be finite and {requirement})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// A segment count was zero.
    #[error("{name} must be at least 1")]
    ZeroSegments { name: &'static str },

    /// The mesh has more vertices than a `u32` index buffer can address.
    #[error("mesh too large: {vertices} vertices")]
    TooManyVertices { vertices: usize },
}
