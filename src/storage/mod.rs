//! Storage - Backend Trait and Implementations
//!
//! Uniform interface over two interchangeable stores:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    StorageBackend Trait                      │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │  MemoryBackend  │           │ PostgresBackend │
//! │  (key-value)    │           │  (relational)   │
//! └─────────────────┘           └─────────────────┘
//! ```
//!
//! The relational variant enforces email uniqueness with a storage-level
//! constraint; the key-value variant scans under its write lock. Both reject
//! a duplicate signup with the same error.

mod backend;
mod error;
mod memory;

#[cfg(feature = "postgres")]
mod postgres;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryBackend;

#[cfg(feature = "postgres")]
pub use postgres::PostgresBackend;
