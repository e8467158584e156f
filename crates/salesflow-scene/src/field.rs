//! The row of decorative boxes and its per-frame group animation.
//!
//! Instance transforms are fixed at construction. Only the enclosing group
//! moves: it spins slowly around X and Y and bobs vertically. The update is
//! a pure function of the previous transform and the frame clock, so it can
//! be tested without a renderer and stays frame-rate independent.

use std::f64::consts::FRAC_PI_2;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::debug;

use crate::error::GeometryError;
use crate::geometry::SolidGeometry;
use crate::material::DecorativeElement;

/// Number of boxes in the hero background.
pub const DEFAULT_COUNT: usize = 42;

/// Distance between neighbouring boxes along X.
pub const SPACING: f64 = 0.78;

/// Index whose box has zero tilt around X.
const TILT_PIVOT: f64 = 10.0;

/// Extra tilt per index step, radians.
const TILT_STEP: f64 = 0.1;

/// Fixed placement of one box inside the group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldInstance {
    pub id: usize,
    pub position: [f64; 3],
    /// Euler angles in radians, XYZ order.
    pub rotation: [f64; 3],
}

/// Transform applied to the whole group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GroupTransform {
    pub rotation: [f64; 3],
    pub position: [f64; 3],
}

/// Clock readings for one rendered frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Time since the clock started.
    pub elapsed: f64,
    /// Time since the previous frame.
    pub delta: f64,
}

/// Rates driving the group animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    /// Radians per second around X.
    pub spin_x: f64,
    /// Radians per second around Y.
    pub spin_y: f64,
    /// Angular frequency of the vertical bob, radians per second.
    pub bob_frequency: f64,
    /// Peak vertical offset.
    pub bob_amplitude: f64,
}

impl Motion {
    pub const SLOW_DRIFT: Self = Self {
        spin_x: 0.045,
        spin_y: 0.028,
        bob_frequency: 0.6,
        bob_amplitude: 0.08,
    };

    /// Advance `prev` by one frame.
    ///
    /// Rotation accumulates by `delta` and is never wrapped. The vertical
    /// offset depends only on `elapsed`, so a zero `delta` leaves rotation
    /// untouched while still placing the group on the bob curve.
    #[must_use]
    pub fn advance(&self, prev: GroupTransform, frame: FrameTime) -> GroupTransform {
        let mut next = prev;
        next.rotation[0] += frame.delta * self.spin_x;
        next.rotation[1] += frame.delta * self.spin_y;
        next.position[1] = (frame.elapsed * self.bob_frequency).sin() * self.bob_amplitude;
        next
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::SLOW_DRIFT
    }
}

/// A row of decorative boxes sharing one geometry and one group transform.
#[derive(Debug)]
pub struct AnimatedField {
    instances: Vec<FieldInstance>,
    motion: Motion,
    geometry: OnceLock<Arc<SolidGeometry>>,
    /// `None` until mounted.
    group: Option<GroupTransform>,
}

impl AnimatedField {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            instances: layout(count),
            motion: Motion::SLOW_DRIFT,
            geometry: OnceLock::new(),
            group: None,
        }
    }

    #[must_use]
    pub fn instances(&self) -> &[FieldInstance] {
        &self.instances
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// The shared solid, built on first call and reused until unmount.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the solid cannot be built.
    pub fn geometry(&self) -> Result<Arc<SolidGeometry>, GeometryError> {
        if let Some(geometry) = self.geometry.get() {
            return Ok(Arc::clone(geometry));
        }
        let built = Arc::new(SolidGeometry::rounded_box()?);
        Ok(Arc::clone(self.geometry.get_or_init(|| built)))
    }

    /// Every box as a renderable element.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the shared solid cannot be built.
    pub fn elements(&self) -> Result<Vec<DecorativeElement>, GeometryError> {
        let geometry = self.geometry()?;
        Ok(self
            .instances
            .iter()
            .map(|inst| DecorativeElement::new(Arc::clone(&geometry), inst.position, inst.rotation))
            .collect())
    }

    /// Attach the group; frames advance it from the identity transform.
    pub fn mount(&mut self) {
        if self.group.is_none() {
            debug!(count = self.instances.len(), "animated field mounted");
            self.group = Some(GroupTransform::default());
        }
    }

    /// Detach the group and drop the cached geometry.
    pub fn unmount(&mut self) {
        self.group = None;
        self.geometry = OnceLock::new();
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.group.is_some()
    }

    #[must_use]
    pub fn group(&self) -> Option<GroupTransform> {
        self.group
    }

    /// Per-frame callback. Returns the new group transform, or `None`
    /// without doing anything if the field is not mounted.
    pub fn on_frame(&mut self, frame: FrameTime) -> Option<GroupTransform> {
        let group = self.group.as_mut()?;
        *group = self.motion.advance(*group, frame);
        Some(*group)
    }
}

impl Default for AnimatedField {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT)
    }
}

/// Place `count` boxes in a row centered on the origin.
///
/// Box `i` sits at `x = (i - count / 2) * SPACING` and is tilted by
/// `(i - 10) * 0.1` around X and a quarter turn around Y.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layout(count: usize) -> Vec<FieldInstance> {
    let half = count as f64 / 2.0;
    (0..count)
        .map(|id| {
            let i = id as f64;
            FieldInstance {
                id,
                position: [(i - half) * SPACING, 0.0, 0.0],
                rotation: [(i - TILT_PIVOT) * TILT_STEP, FRAC_PI_2, 0.0],
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn default_row_endpoints() {
        let field = AnimatedField::default();
        let instances = field.instances();
        assert_eq!(instances.len(), 42);
        assert!((instances[0].position[0] + 16.38).abs() < EPS);
        assert!((instances[41].position[0] - 15.6).abs() < EPS);
        assert!(instances.iter().all(|b| b.position[1] == 0.0 && b.position[2] == 0.0));
    }

    #[test]
    fn every_box_has_quarter_turn_around_y() {
        let field = AnimatedField::default();
        assert!(field.instances().iter().all(|b| b.rotation[1] == FRAC_PI_2));
        assert!((field.instances()[10].rotation[0]).abs() < EPS);
        assert!((field.instances()[0].rotation[0] + 1.0).abs() < EPS);
    }

    #[test]
    fn odd_counts_center_on_half_steps() {
        let row = layout(3);
        assert!((row[0].position[0] + 1.5 * SPACING).abs() < EPS);
        assert!((row[2].position[0] - 0.5 * SPACING).abs() < EPS);
    }

    #[test]
    fn zero_delta_keeps_rotation() {
        let motion = Motion::SLOW_DRIFT;
        let prev = GroupTransform {
            rotation: [0.3, 0.2, 0.0],
            position: [0.0, 0.05, 0.0],
        };
        let next = motion.advance(prev, FrameTime { elapsed: 2.5, delta: 0.0 });
        assert_eq!(next.rotation, prev.rotation);
        assert!((next.position[1] - (2.5f64 * 0.6).sin() * 0.08).abs() < EPS);
    }

    #[test]
    fn rotation_is_frame_rate_independent() {
        let motion = Motion::SLOW_DRIFT;
        let run = |fps: u32| {
            let delta = 1.0 / f64::from(fps);
            (1..=fps).fold(GroupTransform::default(), |g, frame| {
                motion.advance(g, FrameTime {
                    elapsed: f64::from(frame) * delta,
                    delta,
                })
            })
        };
        let slow = run(30);
        let fast = run(144);
        assert!((slow.rotation[0] - 0.045).abs() < 1e-9);
        assert!((slow.rotation[0] - fast.rotation[0]).abs() < 1e-9);
        assert!((slow.rotation[1] - fast.rotation[1]).abs() < 1e-9);
        assert!((slow.position[1] - fast.position[1]).abs() < 1e-9);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let motion = Motion::SLOW_DRIFT;
        let mut group = GroupTransform::default();
        for step in 0..2000 {
            let elapsed = f64::from(step) * 0.01;
            group = motion.advance(group, FrameTime { elapsed, delta: 0.01 });
            assert!(group.position[1].abs() <= 0.08 + EPS);
        }
        assert!(group.rotation[0] > 0.0 && group.rotation[1] > 0.0);
    }

    #[test]
    fn frames_before_mount_are_ignored() {
        let mut field = AnimatedField::default();
        assert!(field.on_frame(FrameTime { elapsed: 1.0, delta: 0.016 }).is_none());
        assert!(field.group().is_none());

        field.mount();
        let group = field.on_frame(FrameTime { elapsed: 1.0, delta: 1.0 }).unwrap();
        assert!((group.rotation[0] - 0.045).abs() < EPS);
        assert!((group.rotation[1] - 0.028).abs() < EPS);

        field.unmount();
        assert!(field.on_frame(FrameTime { elapsed: 2.0, delta: 1.0 }).is_none());
    }

    #[test]
    fn geometry_is_built_once_per_mount() {
        let mut field = AnimatedField::default();
        let first = field.geometry().unwrap();
        let second = field.geometry().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let elements = field.elements().unwrap();
        assert_eq!(elements.len(), 42);
        assert!(elements.iter().all(|e| Arc::ptr_eq(&e.geometry, &first)));

        field.unmount();
        let rebuilt = field.geometry().unwrap();
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert_eq!(*first, *rebuilt);
    }
}
