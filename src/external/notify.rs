//! Best-effort failure notifications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::NotifyError;

/// A failed remote lookup, reported to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    /// Normalized identifier whose lookup failed.
    pub identifier: String,
    /// The transport failure message.
    pub error_message: String,
}

impl NotificationEvent {
    /// New event.
    pub fn new(identifier: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            error_message: error_message.into(),
        }
    }

    /// Plain-text body of the notice.
    pub fn body(&self) -> String {
        format!(
            "A connection error occurred while contacting the VAT registry.\n\n\
             VAT: {}\n\
             Error: {}\n\n\
             This message was generated automatically by vatcheck.",
            self.identifier, self.error_message
        )
    }
}

/// Notification channel collaborator.
///
/// Called from a detached task; errors are logged and dropped.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notice to `recipients`.
    async fn notify(
        &self,
        recipients: &[String],
        subject: &str,
        event: &NotificationEvent,
    ) -> Result<(), NotifyError>;
}

/// Emits each notice, rendered body included, as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        recipients: &[String],
        subject: &str,
        event: &NotificationEvent,
    ) -> Result<(), NotifyError> {
        tracing::error!(
            recipients = %recipients.join(","),
            subject,
            identifier = %event.identifier,
            error = %event.error_message,
            body = %event.body(),
            "VAT registry lookup failed"
        );
        Ok(())
    }
}
