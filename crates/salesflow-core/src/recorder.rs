//! Where accepted waitlist addresses go.
//!
//! [`WaitlistRecorder`] is the seam for a mailing-list provider. Today the
//! only production recorder writes a structured log event; no address is
//! stored by this service.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::error::RecordError;
use crate::waitlist::Email;

/// Receives every address that passes the submission check.
///
/// Implementations must be safe to share across async tasks.
#[async_trait::async_trait]
pub trait WaitlistRecorder: Send + Sync {
    /// The recorder's name (for error reporting).
    fn name(&self) -> &str;

    /// Record one address.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the address could not be accepted.
    async fn record(&self, email: &Email) -> Result<(), RecordError>;
}

/// Writes each address to the operational log under the `waitlist` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRecorder;

#[async_trait::async_trait]
impl WaitlistRecorder for LogRecorder {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "log"
    }

    async fn record(&self, email: &Email) -> Result<(), RecordError> {
        info!(target: "waitlist", email = %email, "waitlist signup");
        Ok(())
    }
}

/// Keeps addresses in memory. Lost on exit; meant for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    entries: Arc<RwLock<Vec<String>>>,
}

impl MemoryRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses recorded so far, oldest first.
    pub async fn entries(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }
}

#[async_trait::async_trait]
impl WaitlistRecorder for MemoryRecorder {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    async fn record(&self, email: &Email) -> Result<(), RecordError> {
        self.entries.write().await.push(email.as_str().to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::waitlist::parse_submission;

    #[tokio::test]
    async fn memory_recorder_keeps_order() {
        let recorder = MemoryRecorder::new();
        for body in [r#"{"email":"a@b.com"}"#, r#"{"email":"c@d.com"}"#] {
            let email = parse_submission(body.as_bytes()).unwrap();
            recorder.record(&email).await.unwrap();
        }
        assert_eq!(recorder.entries().await, vec!["a@b.com", "c@d.com"]);
    }

    #[tokio::test]
    async fn log_recorder_always_succeeds() {
        let email = parse_submission(br#"{"email":"a@b.com"}"#).unwrap();
        let recorder: Arc<dyn WaitlistRecorder> = Arc::new(LogRecorder);
        assert!(recorder.record(&email).await.is_ok());
        assert_eq!(recorder.name(), "log");
    }
}
