//! CinePulse - Movie Feedback Backend
//!
//! A minimal backend for a movie-feedback application: signup/login, a
//! static seeded movie catalog, and a feedback CRUD surface, backed
//! interchangeably by an in-process key-value store or Postgres, with a
//! best-effort webhook notification on new feedback.
//!
//! # Architecture
//!
//! ```text
//! client → api (axum) → CredentialService / FeedbackService
//!                              │                  │
//!                              ▼                  ├──→ Notifier (spawned)
//!                        StorageBackend ◄─────────┘
//!                        (memory | postgres)
//! ```
//!
//! The storage trait is the only seam the services see; the backend variant
//! is chosen by configuration at startup.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod model;
pub mod notify;
pub mod session;
pub mod storage;

/// Default HTTP bind address (the original server listened on port 5000)
pub const HTTP_BIND_ADDRESS_DEFAULT: &str = "127.0.0.1:5000";

/// Application name
pub const APP_NAME: &str = "cinepulse";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
