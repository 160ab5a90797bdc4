//! In-process document store.
//!
//! Used by tests and for running the service without a database-backed
//! document store. Documents are kept for the lifetime of the value.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use listing_core::{Document, DocumentId};
use uuid::Uuid;

use super::{DocumentStore, RepositoryError};

/// Document store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<(DocumentId, Document)>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every document in a collection, in creation order.
    #[must_use]
    pub fn documents(&self, collection: &str) -> Vec<(DocumentId, Document)> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of documents across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Whether no document has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, RepositoryError> {
        let id = DocumentId::new(Uuid::new_v4().to_string());
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(collection.to_owned())
            .or_default()
            .push((id.clone(), document));
        Ok(id)
    }
}
