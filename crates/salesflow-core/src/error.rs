//! Error types for `salesflow-core`.
//!
//! Display strings of [`SubmissionError`] are user-facing: the server sends
//! them verbatim and the form shows them verbatim.

/// Why a waitlist submission body was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The body was not JSON, or was JSON `null`.
    #[error("Invalid request.")]
    InvalidRequest,

    /// `email` was missing, not a string, or had no `@`.
    #[error("Please enter a valid email.")]
    InvalidEmail,
}

/// A recorder failed to accept an address.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("recorder '{name}' failed: {reason}")]
    Backend { name: String, reason: String },
}

/// A submission from the capture form did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The endpoint answered with a non-success status.
    #[error("waitlist endpoint returned {status}")]
    Rejected {
        status: u16,
        /// The `error` field of the response body, if there was one.
        message: Option<String>,
    },

    /// No response arrived within the client timeout.
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),
}

/// The capture form refused a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    InFlight,
}
