//! Notification side-channel fired on new feedback.
//!
//! Dispatch happens on a spawned task after the record is durably stored, so
//! a notification failure can never mask or roll back a successful write.
//! Failures are visible in the logs only; the caller's response does not
//! depend on them.

use async_trait::async_trait;
use serde::Serialize;

use crate::model::Feedback;

/// Payload sent for each new feedback record.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackNotice {
    pub user_name: String,
    pub rating: i64,
    pub text: String,
    pub sentiment: String,
    /// Human-readable summary, same shape the original topic message had.
    pub message: String,
}

impl FeedbackNotice {
    #[must_use]
    pub fn from_feedback(feedback: &Feedback) -> Self {
        let message = format!(
            "New Feedback Received!\nUser: {}\nRating: {}/5\nComment: {}\nSentiment: {}",
            feedback.user_name, feedback.rating, feedback.text, feedback.sentiment
        );
        Self {
            user_name: feedback.user_name.clone(),
            rating: feedback.rating,
            text: feedback.text.clone(),
            sentiment: feedback.sentiment.clone(),
            message,
        }
    }
}

/// Outbound notification boundary.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: &FeedbackNotice) -> anyhow::Result<()>;
}

/// POSTs the notice as JSON to a configured webhook URL.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    #[must_use]
    pub fn new(url: String) -> Self {
        assert!(!url.is_empty(), "webhook URL cannot be empty");
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notice: &FeedbackNotice) -> anyhow::Result<()> {
        self.client
            .post(&self.url)
            .json(notice)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(user = %notice.user_name, "feedback notification delivered");
        Ok(())
    }
}

/// Logs the notice instead of sending it. Used when no webhook is configured.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, notice: &FeedbackNotice) -> anyhow::Result<()> {
        tracing::debug!(user = %notice.user_name, rating = notice.rating, "feedback notification (no webhook configured)");
        Ok(())
    }
}
