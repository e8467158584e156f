//! HTTP error types for the Sales Flow server.
//!
//! Every error renders as `{"error": "<message>"}`. The message is shown to
//! the visitor as-is, so internal detail stays in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use salesflow_core::error::{RecordError, SubmissionError};

/// Shown when the server fails after accepting a valid submission.
const INTERNAL_MESSAGE: &str = "Something went wrong";

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error.
    Internal,
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_owned()),
        };

        (status, axum::Json(ErrorBody { error })).into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        warn!(error = %err, "failed to record waitlist signup");
        Self::Internal
    }
}
