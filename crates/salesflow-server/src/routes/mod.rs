//! HTTP route handlers for Sales Flow.
//!
//! - `waitlist`: `POST /api/waitlist`
//! - `scene`: `GET /api/scene`, the background description for the renderer
//! - `ui`: the landing page at `/`

pub mod scene;
pub mod ui;
pub mod waitlist;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Most API requests handled at once.
const API_CONCURRENCY_LIMIT: usize = 64;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .merge(waitlist::router())
        .merge(scene::router())
        .layer(tower::limit::ConcurrencyLimitLayer::new(API_CONCURRENCY_LIMIT))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .merge(api_routes)
        .merge(ui::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
