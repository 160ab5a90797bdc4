//! Document store access.
//!
//! # Database: `listing`
//!
//! The document store is schemaless from the caller's point of view: any
//! [`Document`] is accepted as written, keyed by collection name.
//!
//! ## Tables
//!
//! - `listing.document` - Documents as JSONB, one row per created document
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/seller/migrations/` and run via:
//! ```bash
//! cargo run -p listing-cli -- migrate
//! ```

pub mod documents;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use listing_core::{Document, DocumentId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use documents::PgDocumentStore;
pub use memory::MemoryDocumentStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data could not be encoded or decoded.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Structured-record storage.
///
/// The store assigns document identifiers; callers never choose them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document in `collection` and return its new identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store rejects or fails the write.
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
