//! Shared application state for the Sales Flow server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. Everything in it is immutable apart from
//! whatever the recorder does internally.

use std::sync::Arc;

use tracing::warn;

use salesflow_core::recorder::WaitlistRecorder;
use salesflow_scene::{GeometryError, SceneDescriptor, SceneHost};

use crate::config::{ServerConfig, MAX_FIELD_COUNT};

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Background scene, built once at startup.
    pub scene: SceneDescriptor,
    /// Destination for accepted waitlist addresses.
    pub recorder: Arc<dyn WaitlistRecorder>,
}

impl AppState {
    /// Build the scene for `config` and pair it with `recorder`.
    ///
    /// A `field_count` above [`MAX_FIELD_COUNT`] is clamped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the background geometry cannot be built.
    pub fn build(
        config: &ServerConfig,
        recorder: Arc<dyn WaitlistRecorder>,
    ) -> Result<Self, GeometryError> {
        let mut count = config.field_count;
        if count > MAX_FIELD_COUNT {
            warn!(
                requested = count,
                max = MAX_FIELD_COUNT,
                "field count too large, clamping"
            );
            count = MAX_FIELD_COUNT;
        }
        let scene = SceneHost::new(count).describe()?;
        Ok(Self { scene, recorder })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("recorder", &self.recorder.name())
            .finish_non_exhaustive()
    }
}
