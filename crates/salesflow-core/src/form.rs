//! Capture form state machine.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success
//!                   │  ▲
//!                  err │ submit
//!                   ▼  │
//!                   Error
//! ```
//!
//! `Success` clears the email field but does not lock the form, so a later
//! submit re-enters `Loading`. While `Loading`, further submits are refused
//! and never reach the endpoint.

use serde::Serialize;
use tracing::debug;

use crate::client::WaitlistClient;
use crate::error::{FormError, SubmitError};

/// Shown after a successful submission.
pub const CONFIRMATION: &str = "You’re on the waitlist. We’ll email you when early access opens.";

/// Helper text when there is no status message.
pub const PRIVACY_NOTE: &str = "No spam. Just one email when early access opens.";

/// Used when the endpoint rejects a submission without saying why.
pub const UNKNOWN_SERVER_ERROR: &str = "Something went wrong";

/// Used when a transport error carries no message.
pub const FALLBACK_ERROR: &str = "Please try again.";

const SUCCESS_COLOR: &str = "rgba(5,150,105,1)";
const ERROR_COLOR: &str = "rgba(220,38,38,1)";
const NEUTRAL_COLOR: &str = "rgba(0,0,0,0.55)";

/// Where the form is in its submit cycle. Messages live inside the variants
/// that show them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success { message: String },
    Error { message: String },
}

impl FormStatus {
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message } | Self::Error { message } => Some(message),
            Self::Idle | Self::Loading => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// A submission handed out by [`CaptureForm::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub email: String,
}

/// Email input plus submit status for one mounted form.
#[derive(Debug, Clone, Default)]
pub struct CaptureForm {
    email: String,
    status: FormStatus,
}

impl CaptureForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Input change handler.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Enter `Loading` and hand out the value to submit.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InFlight`] if a submission is already pending.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.status.is_loading() {
            return Err(FormError::InFlight);
        }
        self.status = FormStatus::Loading;
        Ok(Submission {
            email: self.email.clone(),
        })
    }

    /// Apply the outcome of the pending submission.
    ///
    /// Ignored when nothing is pending.
    pub fn complete(&mut self, outcome: Result<(), SubmitError>) {
        if !self.status.is_loading() {
            debug!("submission outcome arrived with nothing pending, ignoring");
            return;
        }
        self.status = match outcome {
            Ok(()) => {
                self.email.clear();
                FormStatus::Success {
                    message: CONFIRMATION.to_owned(),
                }
            }
            Err(err) => FormStatus::Error {
                message: failure_message(&err),
            },
        };
    }

    /// Submit the current email through `client` and settle the status.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InFlight`] without contacting `client` if a
    /// submission is already pending. Endpoint failures are not errors
    /// here; they move the form to [`FormStatus::Error`].
    pub async fn submit<C>(&mut self, client: &C) -> Result<(), FormError>
    where
        C: WaitlistClient + ?Sized,
    {
        let submission = self.begin_submit()?;
        let outcome = client.join(&submission.email).await;
        self.complete(outcome);
        Ok(())
    }

    #[must_use]
    pub fn view(&self) -> FormView {
        FormView::from(&self.status)
    }
}

/// Text the form shows for a failed submission.
fn failure_message(err: &SubmitError) -> String {
    match err {
        SubmitError::Rejected {
            message: Some(message),
            ..
        } if !message.is_empty() => message.clone(),
        SubmitError::Rejected { .. } => UNKNOWN_SERVER_ERROR.to_owned(),
        SubmitError::Transport(reason) if !reason.is_empty() => reason.clone(),
        SubmitError::Transport(_) => FALLBACK_ERROR.to_owned(),
        SubmitError::Timeout => err.to_string(),
    }
}

/// Presentation derived from a [`FormStatus`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub button_label: &'static str,
    pub button_disabled: bool,
    pub button_opacity: f64,
    pub cursor: &'static str,
    pub helper_text: String,
    pub helper_color: &'static str,
}

impl From<&FormStatus> for FormView {
    fn from(status: &FormStatus) -> Self {
        let loading = status.is_loading();
        let helper_color = match status {
            FormStatus::Success { .. } => SUCCESS_COLOR,
            FormStatus::Error { .. } => ERROR_COLOR,
            FormStatus::Idle | FormStatus::Loading => NEUTRAL_COLOR,
        };
        let helper_text = status
            .message()
            .filter(|m| !m.is_empty())
            .unwrap_or(PRIVACY_NOTE)
            .to_owned();

        Self {
            button_label: if loading { "Joining..." } else { "Join the waitlist" },
            button_disabled: loading,
            button_opacity: if loading { 0.7 } else { 1.0 },
            cursor: if loading { "not-allowed" } else { "pointer" },
            helper_text,
            helper_color,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Client that answers from a fixed script and counts calls.
    struct ScriptedClient {
        outcome: Result<(), SubmitError>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(outcome: Result<(), SubmitError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl WaitlistClient for ScriptedClient {
        async fn join(&self, _email: &str) -> Result<(), SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        let form = CaptureForm::new();
        assert_eq!(form.status(), &FormStatus::Idle);
        assert_eq!(form.email(), "");
        assert_eq!(form.view().helper_text, PRIVACY_NOTE);
    }

    #[test]
    fn second_begin_while_loading_is_refused() {
        let mut form = CaptureForm::new();
        form.set_email("a@b.com");
        let first = form.begin_submit().unwrap();
        assert_eq!(first.email, "a@b.com");
        assert_eq!(form.begin_submit().unwrap_err(), FormError::InFlight);
        assert!(form.view().button_disabled);
    }

    #[tokio::test]
    async fn double_submit_issues_one_request() {
        let client = ScriptedClient::new(Ok(()));
        let mut form = CaptureForm::new();
        form.set_email("a@b.com");

        let pending = form.begin_submit().unwrap();
        assert_eq!(form.submit(&client).await, Err(FormError::InFlight));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);

        form.complete(client.join(&pending.email).await);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(form.status(), FormStatus::Success { .. }));
    }

    #[tokio::test]
    async fn success_clears_email_and_confirms() {
        let client = ScriptedClient::new(Ok(()));
        let mut form = CaptureForm::new();
        form.set_email("a@b.com");
        form.submit(&client).await.unwrap();

        assert_eq!(form.email(), "");
        assert_eq!(form.status().message(), Some(CONFIRMATION));
        let view = form.view();
        assert_eq!(view.helper_color, SUCCESS_COLOR);
        assert_eq!(view.button_label, "Join the waitlist");
        assert!(!view.button_disabled);
    }

    #[tokio::test]
    async fn server_error_text_is_shown() {
        let client = ScriptedClient::new(Err(SubmitError::Rejected {
            status: 400,
            message: Some("Please enter a valid email.".to_owned()),
        }));
        let mut form = CaptureForm::new();
        form.set_email("not-an-email");
        form.submit(&client).await.unwrap();

        assert_eq!(
            form.status(),
            &FormStatus::Error {
                message: "Please enter a valid email.".to_owned()
            }
        );
        assert_eq!(form.email(), "not-an-email");
        assert_eq!(form.view().helper_color, ERROR_COLOR);
    }

    #[test]
    fn failure_messages_fall_back() {
        let rejected = SubmitError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(failure_message(&rejected), UNKNOWN_SERVER_ERROR);
        assert_eq!(
            failure_message(&SubmitError::Transport(String::new())),
            FALLBACK_ERROR
        );
        assert_eq!(
            failure_message(&SubmitError::Transport("connection refused".to_owned())),
            "connection refused"
        );
        assert!(failure_message(&SubmitError::Timeout).contains("try again"));
    }

    #[test]
    fn error_can_resubmit_and_loading_drops_message() {
        let mut form = CaptureForm::new();
        form.begin_submit().unwrap();
        form.complete(Err(SubmitError::Timeout));
        assert!(form.status().message().is_some());

        form.begin_submit().unwrap();
        assert_eq!(form.status(), &FormStatus::Loading);
        let view = form.view();
        assert_eq!(view.helper_text, PRIVACY_NOTE);
        assert_eq!(view.helper_color, NEUTRAL_COLOR);
        assert_eq!(view.button_label, "Joining...");
        assert!((view.button_opacity - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn success_is_not_terminal() {
        let mut form = CaptureForm::new();
        form.set_email("a@b.com");
        form.begin_submit().unwrap();
        form.complete(Ok(()));

        let again = form.begin_submit().unwrap();
        assert_eq!(again.email, "");
        assert!(form.status().is_loading());
    }

    #[test]
    fn stray_completion_is_ignored() {
        let mut form = CaptureForm::new();
        form.complete(Ok(()));
        assert_eq!(form.status(), &FormStatus::Idle);
    }
}
