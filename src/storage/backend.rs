//! The backend-agnostic storage contract.

use async_trait::async_trait;

use crate::model::{Feedback, FeedbackUpdate, Movie, User};

use super::error::StorageResult;

/// Uniform interface over the relational and key-value stores.
///
/// Services hold an `Arc<dyn StorageBackend>` and never know which variant
/// they are talking to. Both variants must produce the same observable
/// outcome for a duplicate signup ([`super::StorageError::DuplicateEmail`]).
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Look up a user by exact email match.
    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Persist a new user. Fails with `DuplicateEmail` if the email is taken.
    async fn insert_user(&self, user: &User) -> StorageResult<()>;

    /// Full snapshot of the movie catalog, unordered.
    async fn list_movies(&self) -> StorageResult<Vec<Movie>>;

    /// Persist a feedback record as-is.
    async fn insert_feedback(&self, feedback: &Feedback) -> StorageResult<()>;

    /// Fetch one feedback record by id.
    async fn get_feedback(&self, id: &str) -> StorageResult<Option<Feedback>>;

    /// All feedback, ordered by `created_at` descending (newest first).
    async fn list_feedback(&self) -> StorageResult<Vec<Feedback>>;

    /// Replace rating/text/sentiment on a record. Succeeds as a no-op when
    /// the id is absent.
    async fn update_feedback(&self, id: &str, update: &FeedbackUpdate) -> StorageResult<()>;

    /// Remove a record by id. Idempotent; absent ids are not an error.
    async fn delete_feedback(&self, id: &str) -> StorageResult<()>;
}
