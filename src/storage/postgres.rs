//! PostgresBackend - Relational Storage
//!
//! The relational variant of the storage adapter. Email uniqueness is
//! enforced by a storage-level constraint: the insert fails atomically on a
//! duplicate key and is mapped to `DuplicateEmail`, the same observable
//! outcome as the key-value variant.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS users (
//!     id TEXT PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     email TEXT UNIQUE NOT NULL,
//!     password_hash TEXT NOT NULL,
//!     role TEXT NOT NULL,
//!     photo TEXT,
//!     notifications_enabled BOOLEAN NOT NULL DEFAULT TRUE
//! );
//! CREATE TABLE IF NOT EXISTS movies (... loose descriptive columns ...);
//! CREATE TABLE IF NOT EXISTS feedback (
//!     id TEXT PRIMARY KEY,
//!     movie_id TEXT, user_id TEXT, user_name TEXT,
//!     rating BIGINT, text TEXT, created_at TEXT, sentiment TEXT
//! );
//! ```

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use async_trait::async_trait;

use crate::catalog::seed_catalog;
use crate::model::{Feedback, FeedbackUpdate, Movie, User};

use super::backend::StorageBackend;
use super::error::{StorageError, StorageResult};

/// Postgres unique-violation SQLSTATE code.
const UNIQUE_VIOLATION: &str = "23505";

// =============================================================================
// PostgresBackend
// =============================================================================

/// PostgreSQL storage backend.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Create a new backend, initialize the schema, and seed the movie
    /// catalog if the movies table is empty.
    ///
    /// # Errors
    /// Returns an error if the connection or schema setup fails.
    pub async fn new(connection_string: &str) -> StorageResult<Self> {
        // Preconditions
        assert!(
            !connection_string.is_empty(),
            "connection string cannot be empty"
        );
        assert!(
            connection_string.starts_with("postgres://")
                || connection_string.starts_with("postgresql://"),
            "connection string must be a postgres URL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await
            .map_err(|e| StorageError::connection(format!("failed to connect: {e}")))?;

        let backend = Self { pool };
        backend.init_schema().await?;
        backend.seed_movies().await?;

        Ok(backend)
    }

    /// Create from an existing pool (shared across tests).
    pub async fn from_pool(pool: PgPool) -> StorageResult<Self> {
        let backend = Self { pool };
        backend.init_schema().await?;
        backend.seed_movies().await?;
        Ok(backend)
    }

    async fn init_schema(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                photo TEXT,
                notifications_enabled BOOLEAN NOT NULL DEFAULT TRUE
            );
            CREATE TABLE IF NOT EXISTS movies (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                poster TEXT,
                description TEXT,
                genre TEXT,
                category TEXT,
                "cast" TEXT,
                director TEXT,
                hero TEXT,
                heroine TEXT,
                vibe TEXT,
                release_type TEXT,
                rating DOUBLE PRECISION NOT NULL
            );
            CREATE TABLE IF NOT EXISTS feedback (
                id TEXT PRIMARY KEY,
                movie_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                user_name TEXT NOT NULL,
                rating BIGINT NOT NULL,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL,
                sentiment TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_feedback_created ON feedback(created_at DESC);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::internal(format!("failed to create schema: {e}")))?;

        Ok(())
    }

    /// Seed the fixed catalog once. Movies are read-only afterwards.
    async fn seed_movies(&self) -> StorageResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::read(format!("failed to count movies: {e}")))?;

        if count > 0 {
            return Ok(());
        }

        for movie in seed_catalog() {
            sqlx::query(
                r#"
                INSERT INTO movies
                    (id, title, poster, description, genre, category, "cast",
                     director, hero, heroine, vibe, release_type, rating)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&movie.id)
            .bind(&movie.title)
            .bind(&movie.poster)
            .bind(&movie.description)
            .bind(&movie.genre)
            .bind(&movie.category)
            .bind(&movie.cast)
            .bind(&movie.director)
            .bind(&movie.hero)
            .bind(&movie.heroine)
            .bind(&movie.vibe)
            .bind(&movie.release_type)
            .bind(movie.rating)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::write(format!("failed to seed movie: {e}")))?;
        }

        Ok(())
    }

    /// Get the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn row_to_user(row: &PgRow) -> StorageResult<User> {
    Ok(User {
        id: get(row, "id")?,
        name: get(row, "name")?,
        email: get(row, "email")?,
        password_hash: get(row, "password_hash")?,
        role: get(row, "role")?,
        photo: get(row, "photo")?,
        notifications_enabled: get(row, "notifications_enabled")?,
    })
}

fn row_to_movie(row: &PgRow) -> StorageResult<Movie> {
    Ok(Movie {
        id: get(row, "id")?,
        title: get(row, "title")?,
        poster: get(row, "poster")?,
        description: get(row, "description")?,
        genre: get(row, "genre")?,
        category: get(row, "category")?,
        cast: get(row, "cast")?,
        director: get(row, "director")?,
        hero: get(row, "hero")?,
        heroine: get(row, "heroine")?,
        vibe: get(row, "vibe")?,
        release_type: get(row, "release_type")?,
        rating: get(row, "rating")?,
    })
}

fn row_to_feedback(row: &PgRow) -> StorageResult<Feedback> {
    Ok(Feedback {
        id: get(row, "id")?,
        movie_id: get(row, "movie_id")?,
        user_id: get(row, "user_id")?,
        user_name: get(row, "user_name")?,
        rating: get(row, "rating")?,
        text: get(row, "text")?,
        created_at: get(row, "created_at")?,
        sentiment: get(row, "sentiment")?,
    })
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> StorageResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| StorageError::internal(format!("column {column}: {e}")))
}

// =============================================================================
// StorageBackend Implementation
// =============================================================================

#[async_trait]
impl StorageBackend for PostgresBackend {
    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::read(format!("failed to find user: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert_user(&self, user: &User) -> StorageResult<()> {
        // Precondition
        assert!(!user.id.is_empty(), "user must have id");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, photo, notifications_enabled)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(&user.photo)
        .bind(user.notifications_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .and_then(|db| db.code())
                .as_deref()
                == Some(UNIQUE_VIOLATION);
            if duplicate {
                StorageError::DuplicateEmail
            } else {
                StorageError::write(format!("failed to insert user: {e}"))
            }
        })?;

        Ok(())
    }

    async fn list_movies(&self) -> StorageResult<Vec<Movie>> {
        let rows = sqlx::query("SELECT * FROM movies")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::read(format!("failed to list movies: {e}")))?;

        rows.iter().map(row_to_movie).collect()
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> StorageResult<()> {
        assert!(!feedback.id.is_empty(), "feedback must have id");

        sqlx::query(
            r#"
            INSERT INTO feedback (id, movie_id, user_id, user_name, rating, text, created_at, sentiment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&feedback.id)
        .bind(&feedback.movie_id)
        .bind(&feedback.user_id)
        .bind(&feedback.user_name)
        .bind(feedback.rating)
        .bind(&feedback.text)
        .bind(&feedback.created_at)
        .bind(&feedback.sentiment)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::write(format!("failed to insert feedback: {e}")))?;

        Ok(())
    }

    async fn get_feedback(&self, id: &str) -> StorageResult<Option<Feedback>> {
        let row = sqlx::query("SELECT * FROM feedback WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::read(format!("failed to get feedback: {e}")))?;

        row.as_ref().map(row_to_feedback).transpose()
    }

    async fn list_feedback(&self) -> StorageResult<Vec<Feedback>> {
        let rows = sqlx::query("SELECT * FROM feedback ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::read(format!("failed to list feedback: {e}")))?;

        rows.iter().map(row_to_feedback).collect()
    }

    async fn update_feedback(&self, id: &str, update: &FeedbackUpdate) -> StorageResult<()> {
        // No rows affected is a no-op success, matching the source behavior.
        sqlx::query("UPDATE feedback SET rating = $1, text = $2, sentiment = $3 WHERE id = $4")
            .bind(update.rating)
            .bind(&update.text)
            .bind(&update.sentiment)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::write(format!("failed to update feedback: {e}")))?;

        Ok(())
    }

    async fn delete_feedback(&self, id: &str) -> StorageResult<()> {
        sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::write(format!("failed to delete feedback: {e}")))?;

        Ok(())
    }
}

// =============================================================================
// Tests (require running Postgres)
// =============================================================================
