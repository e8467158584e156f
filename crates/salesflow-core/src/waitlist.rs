//! Server-side check of `POST /api/waitlist` bodies.
//!
//! The check is deliberately shallow: the body must be a JSON value other
//! than `null`, and its `email` field must be a string containing `@`.
//! Anything deeper is left to whoever eventually consumes the list.

use serde_json::Value;

use crate::error::SubmissionError;

/// An address that passed the submission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Check a raw request body and extract the email.
///
/// A leading UTF-8 byte order mark is ignored.
///
/// # Errors
///
/// - [`SubmissionError::InvalidRequest`] if the body is not JSON or is `null`.
/// - [`SubmissionError::InvalidEmail`] if `email` is absent, not a string,
///   or has no `@`. Non-object bodies such as arrays or numbers land here
///   too, since they have no `email` field.
pub fn parse_submission(body: &[u8]) -> Result<Email, SubmissionError> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    let value: Value =
        serde_json::from_slice(body).map_err(|_| SubmissionError::InvalidRequest)?;
    if value.is_null() {
        return Err(SubmissionError::InvalidRequest);
    }

    match value.get("email").and_then(Value::as_str) {
        Some(email) if email.contains('@') => Ok(Email(email.to_owned())),
        _ => Err(SubmissionError::InvalidEmail),
    }
}
