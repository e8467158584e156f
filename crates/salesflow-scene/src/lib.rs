//! Decorative 3D background for the Sales Flow hero section.
//!
//! Builds one rounded-box solid, lays out a row of instances sharing it,
//! and advances the row's group transform every frame. Nothing here touches
//! a GPU: the host page receives a [`SceneDescriptor`] and applies the
//! transforms that [`Motion::advance`] would produce.

pub mod error;
pub mod field;
pub mod geometry;
pub mod host;
pub mod material;

pub use error::GeometryError;
pub use field::{AnimatedField, FieldInstance, FrameTime, GroupTransform, Motion};
pub use geometry::{ExtrudeSettings, RoundedSquare, SolidGeometry};
pub use host::{Camera, Light, Overlay, SceneDescriptor, SceneHost};
pub use material::{DecorativeElement, PhysicalMaterial};
