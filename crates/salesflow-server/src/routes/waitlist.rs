//! Waitlist route: `POST /api/waitlist`.
//!
//! The body is read as raw bytes so that unparseable JSON and a missing or
//! malformed `email` produce their own messages, whatever the request's
//! `Content-Type` says.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::debug;

use salesflow_core::waitlist::parse_submission;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/waitlist", post(join_waitlist))
}

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub ok: bool,
}

/// Check the submitted email and hand it to the recorder.
async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<JoinResponse>, ApiError> {
    let email = parse_submission(&body).inspect_err(|reason| {
        debug!(%reason, bytes = body.len(), "waitlist submission rejected");
    })?;

    state.recorder.record(&email).await?;

    Ok(Json(JoinResponse { ok: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use salesflow_core::error::RecordError;
    use salesflow_core::recorder::{MemoryRecorder, WaitlistRecorder};
    use salesflow_core::waitlist::Email;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;
    use crate::routes::build_router;

    struct FailingRecorder;

    #[async_trait::async_trait]
    impl WaitlistRecorder for FailingRecorder {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn record(&self, _email: &Email) -> Result<(), RecordError> {
            Err(RecordError::Backend {
                name: "failing".to_owned(),
                reason: "unavailable".to_owned(),
            })
        }
    }

    fn app(recorder: Arc<dyn WaitlistRecorder>) -> Router {
        let config = ServerConfig {
            field_count: 2,
            ..ServerConfig::default()
        };
        build_router(Arc::new(AppState::build(&config, recorder).unwrap()))
    }

    async fn post_body(app: Router, body: &'static str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(
                Request::post("/api/waitlist")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn valid_email_is_recorded() {
        let recorder = MemoryRecorder::new();
        let (status, body) = post_body(app(Arc::new(recorder.clone())), r#"{"email":"a@b.com"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "ok": true }));
        assert_eq!(recorder.entries().await, vec!["a@b.com"]);
    }

    #[tokio::test]
    async fn invalid_emails_get_validation_message() {
        for body in [
            r#"{"email":"not-an-email"}"#,
            r#"{"email":7}"#,
            r#"{"name":"a@b.com"}"#,
            r#"[]"#,
        ] {
            let recorder = MemoryRecorder::new();
            let (status, json) = post_body(app(Arc::new(recorder.clone())), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json, serde_json::json!({ "error": "Please enter a valid email." }));
            assert!(recorder.entries().await.is_empty());
        }
    }

    #[tokio::test]
    async fn malformed_json_gets_generic_message() {
        for body in ["{", "", "email=a@b.com", "null"] {
            let (status, json) = post_body(app(Arc::new(MemoryRecorder::new())), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
            assert_eq!(json, serde_json::json!({ "error": "Invalid request." }));
        }
    }

    #[tokio::test]
    async fn recorder_failure_is_internal_error() {
        let (status, json) = post_body(app(Arc::new(FailingRecorder)), r#"{"email":"a@b.com"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, serde_json::json!({ "error": "Something went wrong" }));
    }

    #[tokio::test]
    async fn responses_are_not_cached() {
        let resp = app(Arc::new(MemoryRecorder::new()))
            .oneshot(
                Request::post("/api/waitlist")
                    .body(Body::from(r#"{"email":"a@b.com"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()["cache-control"], "no-store");
    }
}
