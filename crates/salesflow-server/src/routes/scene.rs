//! Scene route: `GET /api/scene`.
//!
//! Returns the background description the landing page renders: camera,
//! lights, material, the shared box mesh, instance placements, and the
//! motion rates the page's frame loop applies.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use salesflow_scene::SceneDescriptor;

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/scene", get(describe_scene))
}

async fn describe_scene(State(state): State<Arc<AppState>>) -> Json<SceneDescriptor> {
    Json(state.scene.clone())
}
