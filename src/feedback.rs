//! Feedback service: create, list, update, delete.
//!
//! Create persists first, then dispatches the notification on a spawned
//! task; the write's result never depends on the side-effect. Update and
//! delete are open to any caller unless the ownership policy is switched on.

use std::sync::Arc;

use crate::error::ApiError;
use crate::model::{Feedback, FeedbackRequest, FeedbackUpdate};
use crate::notify::{FeedbackNotice, Notifier};
use crate::storage::StorageBackend;

pub struct FeedbackService {
    storage: Arc<dyn StorageBackend>,
    notifier: Arc<dyn Notifier>,
    require_owner: bool,
}

impl FeedbackService {
    #[must_use]
    pub fn new(
        storage: Arc<dyn StorageBackend>,
        notifier: Arc<dyn Notifier>,
        require_owner: bool,
    ) -> Self {
        Self {
            storage,
            notifier,
            require_owner,
        }
    }

    /// Persist a feedback record verbatim, then fire the notification.
    ///
    /// The record is durable before the notification task is spawned; a
    /// notification failure is logged and never surfaced to the caller.
    pub async fn create(&self, request: FeedbackRequest) -> Result<(), ApiError> {
        let feedback = request.into_feedback();
        self.storage.insert_feedback(&feedback).await?;
        tracing::info!(feedback_id = %feedback.id, movie_id = %feedback.movie_id, "feedback stored");

        let notice = FeedbackNotice::from_feedback(&feedback);
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&notice).await {
                tracing::warn!("feedback notification failed: {e:#}");
            }
        });

        Ok(())
    }

    /// All feedback, newest first by `created_at` string comparison.
    pub async fn list(&self) -> Result<Vec<Feedback>, ApiError> {
        Ok(self.storage.list_feedback().await?)
    }

    /// Replace rating/text/sentiment. No-op success when the id is absent.
    ///
    /// `caller` is the session user, when one exists; it is only consulted
    /// under the ownership policy.
    pub async fn update(
        &self,
        id: &str,
        update: &FeedbackUpdate,
        caller: Option<&str>,
    ) -> Result<(), ApiError> {
        self.authorize(id, caller).await?;
        self.storage.update_feedback(id, update).await?;
        Ok(())
    }

    /// Remove a record unconditionally. Idempotent.
    pub async fn delete(&self, id: &str, caller: Option<&str>) -> Result<(), ApiError> {
        self.authorize(id, caller).await?;
        self.storage.delete_feedback(id).await?;
        Ok(())
    }

    /// Ownership policy: when enabled, the session user must own the record.
    /// Absent records pass, keeping the no-op semantics of update/delete.
    async fn authorize(&self, id: &str, caller: Option<&str>) -> Result<(), ApiError> {
        if !self.require_owner {
            return Ok(());
        }
        match self.storage.get_feedback(id).await? {
            Some(record) if caller == Some(record.user_id.as_str()) => Ok(()),
            Some(_) => Err(ApiError::Forbidden),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopNotifier;
    use crate::storage::MemoryBackend;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every notice it receives.
    struct RecordingNotifier {
        notices: Mutex<Vec<FeedbackNotice>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                notices: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notice: &FeedbackNotice) -> anyhow::Result<()> {
            self.notices.lock().unwrap().push(notice.clone());
            Ok(())
        }
    }

    /// Always fails.
    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _notice: &FeedbackNotice) -> anyhow::Result<()> {
            anyhow::bail!("webhook unreachable")
        }
    }

    fn request(id: Option<&str>, user_id: &str, created_at: &str) -> FeedbackRequest {
        FeedbackRequest {
            id: id.map(str::to_string),
            movie_id: "t1".to_string(),
            user_id: user_id.to_string(),
            user_name: "Alice".to_string(),
            rating: 4,
            text: "loved it".to_string(),
            created_at: created_at.to_string(),
            sentiment: "Positive".to_string(),
        }
    }

    fn update() -> FeedbackUpdate {
        FeedbackUpdate {
            rating: 5,
            text: "great".to_string(),
            sentiment: "Positive".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_dispatches_notification() {
        let backend = Arc::new(MemoryBackend::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let service = FeedbackService::new(backend, notifier.clone(), false);

        service.create(request(Some("f1"), "u1", "2024-01-01")).await.unwrap();

        // Dispatch runs on a spawned task; give it a beat to land.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].user_name, "Alice");
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_create() {
        let backend = Arc::new(MemoryBackend::new());
        let service = FeedbackService::new(backend.clone(), Arc::new(FailingNotifier), false);

        service.create(request(Some("f1"), "u1", "2024-01-01")).await.unwrap();

        // The record is durable despite the failed side-effect.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let stored = backend.get_feedback("f1").await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let backend = Arc::new(MemoryBackend::new());
        let service = FeedbackService::new(backend, Arc::new(NoopNotifier), false);

        for (id, date) in [("f1", "2024-01-01"), ("f2", "2024-03-01"), ("f3", "2024-02-01")] {
            service.create(request(Some(id), "u1", date)).await.unwrap();
        }

        let records = service.list().await.unwrap();
        let dates: Vec<&str> = records.iter().map(|f| f.created_at.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[tokio::test]
    async fn test_any_caller_may_mutate_by_default() {
        let backend = Arc::new(MemoryBackend::new());
        let service = FeedbackService::new(backend.clone(), Arc::new(NoopNotifier), false);

        service.create(request(Some("f1"), "u1", "2024-01-01")).await.unwrap();

        // No session at all, still allowed.
        service.update("f1", &update(), None).await.unwrap();
        service.delete("f1", Some("someone-else")).await.unwrap();
        assert!(backend.get_feedback("f1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ownership_policy_blocks_non_owner() {
        let backend = Arc::new(MemoryBackend::new());
        let service = FeedbackService::new(backend.clone(), Arc::new(NoopNotifier), true);

        service.create(request(Some("f1"), "u1", "2024-01-01")).await.unwrap();

        let err = service.update("f1", &update(), Some("u2")).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
        let err = service.delete("f1", None).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));

        // The owner may mutate.
        service.update("f1", &update(), Some("u1")).await.unwrap();
        let record = backend.get_feedback("f1").await.unwrap().unwrap();
        assert_eq!(record.rating, 5);
        service.delete("f1", Some("u1")).await.unwrap();

        // Absent ids keep no-op semantics even under the policy.
        service.update("ghost", &update(), None).await.unwrap();
        service.delete("ghost", None).await.unwrap();
    }
}
