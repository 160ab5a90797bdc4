//! `PostgreSQL`-backed document store.
//!
//! Documents are stored as JSONB in `listing.document`. Queries use the
//! runtime-checked sqlx API so the crate builds without a live database.

use async_trait::async_trait;
use listing_core::{Document, DocumentId};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use super::{DocumentStore, RepositoryError};

/// Document store writing to `PostgreSQL`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new document store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self, document), fields(fields = document.len()))]
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, RepositoryError> {
        let fields = serde_json::to_value(&document)
            .map_err(|e| RepositoryError::DataCorruption(format!("unencodable document: {e}")))?;

        let id: Uuid = sqlx::query_scalar(
            r"
            INSERT INTO listing.document (collection, fields)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(collection)
        .bind(Json(fields))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(%id, "document created");
        Ok(DocumentId::new(id.to_string()))
    }
}
