//! MemoryBackend - In-Process Key-Value Storage
//!
//! The key-value variant of the storage adapter: plain maps behind tokio
//! RwLocks, seeded with the fixed movie catalog at construction.
//!
//! Email uniqueness is scan-then-insert, but the scan and the insert happen
//! under a single write lock, so the race window the pattern normally has
//! does not exist here. The observable contract is identical to the
//! constraint-enforced relational variant: a duplicate signup fails with
//! `DuplicateEmail`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::seed_catalog;
use crate::model::{Feedback, FeedbackUpdate, Movie, User};

use super::backend::StorageBackend;
use super::error::{StorageError, StorageResult};

/// In-memory storage backend. Also the test double for every service test.
pub struct MemoryBackend {
    users: RwLock<HashMap<String, User>>,
    movies: Vec<Movie>,
    feedback: RwLock<HashMap<String, Feedback>>,
}

impl MemoryBackend {
    /// Create an empty backend seeded with the movie catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            movies: seed_catalog(),
            feedback: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> StorageResult<()> {
        // Precondition
        assert!(!user.id.is_empty(), "user must have id");

        // Scan and insert under one write lock; no check-then-act window.
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StorageError::DuplicateEmail);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn list_movies(&self) -> StorageResult<Vec<Movie>> {
        Ok(self.movies.clone())
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> StorageResult<()> {
        assert!(!feedback.id.is_empty(), "feedback must have id");

        let mut map = self.feedback.write().await;
        map.insert(feedback.id.clone(), feedback.clone());
        Ok(())
    }

    async fn get_feedback(&self, id: &str) -> StorageResult<Option<Feedback>> {
        let map = self.feedback.read().await;
        Ok(map.get(id).cloned())
    }

    async fn list_feedback(&self) -> StorageResult<Vec<Feedback>> {
        let map = self.feedback.read().await;
        let mut records: Vec<Feedback> = map.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn update_feedback(&self, id: &str, update: &FeedbackUpdate) -> StorageResult<()> {
        let mut map = self.feedback.write().await;
        if let Some(record) = map.get_mut(id) {
            record.rating = update.rating;
            record.text = update.text.clone();
            record.sentiment = update.sentiment.clone();
        }
        // Absent id: no-op success, matching the relational variant.
        Ok(())
    }

    async fn delete_feedback(&self, id: &str) -> StorageResult<()> {
        let mut map = self.feedback.write().await;
        map.remove(id);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
