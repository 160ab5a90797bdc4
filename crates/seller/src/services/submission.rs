//! Product submission workflow.
//!
//! # Steps
//!
//! 1. Require an image (no external calls otherwise)
//! 2. Upload it to `images/<original filename>`
//! 3. Resolve the uploaded object's public URL
//! 4. Create the product record in the `products` collection
//!
//! Steps run strictly in order and a failure stops the chain. Nothing is
//! rolled back: if step 4 fails, the image uploaded in step 2 stays in the
//! object store. Uploads with the same filename replace each other, and the
//! filename is used unsanitized. There is no retry, timeout, or
//! de-duplication; two overlapping submissions create two records.

use std::sync::Arc;

use listing_core::{DocumentId, ProductDraft, ProductRecord};
use thiserror::Error;
use tracing::instrument;

use super::auth_gate::AuthenticatedSession;
use crate::db::{DocumentStore, RepositoryError};
use crate::storage::{ObjectStore, StorageError};

/// Collection product records are created in.
pub const PRODUCTS_COLLECTION: &str = "products";

/// Object path prefix for uploaded product images.
pub const IMAGE_PREFIX: &str = "images";

/// Message shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Product added successfully!";

/// Input problems detected before any external call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No image was selected.
    #[error("Please upload an image.")]
    MissingImage,
}

/// Errors that can end a submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The draft failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The object store failed to store the image or resolve its URL.
    #[error(transparent)]
    Upload(StorageError),

    /// The document store failed to create the record.
    #[error(transparent)]
    Persistence(RepositoryError),

    /// Anything else, e.g. the workflow task panicked.
    #[error("{0}")]
    Unknown(String),
}

/// A successfully created product.
#[derive(Debug, Clone)]
pub struct SubmittedProduct {
    /// Identifier assigned by the document store.
    pub id: DocumentId,
    /// The record as written.
    pub record: ProductRecord,
}

/// User-facing outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    /// Carries the failing operation's message.
    Error(String),
}

impl SubmissionResult {
    /// Text shown in place of the form result.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success => SUCCESS_MESSAGE.to_string(),
            Self::Error(message) => format!("Error adding product: {message}"),
        }
    }

    /// Whether the submission succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl<T> From<&Result<T, SubmissionError>> for SubmissionResult {
    fn from(result: &Result<T, SubmissionError>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Object path an image with `filename` is uploaded to.
#[must_use]
pub fn image_path(filename: &str) -> String {
    format!("{IMAGE_PREFIX}/{filename}")
}

/// Upload-then-persist workflow bound to an authenticated session.
#[derive(Clone)]
pub struct SubmissionWorkflow {
    session: AuthenticatedSession,
    objects: Arc<dyn ObjectStore>,
    documents: Arc<dyn DocumentStore>,
}

impl SubmissionWorkflow {
    /// Create a workflow for `session` over the given collaborators.
    #[must_use]
    pub fn new(
        session: AuthenticatedSession,
        objects: Arc<dyn ObjectStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            session,
            objects,
            documents,
        }
    }

    /// The session submissions are attributed to.
    #[must_use]
    pub const fn session(&self) -> &AuthenticatedSession {
        &self.session
    }

    /// Run the workflow for `draft`.
    ///
    /// # Errors
    ///
    /// - `SubmissionError::Validation` if the draft has no image
    /// - `SubmissionError::Upload` if the upload or URL lookup fails
    /// - `SubmissionError::Persistence` if the record cannot be created
    #[instrument(skip_all, fields(uid = %self.session.uid()))]
    pub async fn submit(&self, draft: &ProductDraft) -> Result<SubmittedProduct, SubmissionError> {
        let result = self.run(draft).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Error adding product");
        }
        result
    }

    async fn run(&self, draft: &ProductDraft) -> Result<SubmittedProduct, SubmissionError> {
        let image = draft.image.as_ref().ok_or(ValidationError::MissingImage)?;

        let path = image_path(&image.name);
        let handle = self
            .objects
            .upload(&path, image.bytes.clone(), image.content_type.as_deref())
            .await
            .map_err(SubmissionError::Upload)?;

        let image_url = self
            .objects
            .public_url(&handle)
            .await
            .map_err(SubmissionError::Upload)?;

        let record = ProductRecord::from_draft(draft, image_url, self.session.uid().clone());
        let id = self
            .documents
            .create_document(PRODUCTS_COLLECTION, record.to_document())
            .await
            .map_err(|e| {
                tracing::warn!(path = %handle.path(), "record not created, uploaded image left in place");
                SubmissionError::Persistence(e)
            })?;

        tracing::info!(%id, "product created");
        Ok(SubmittedProduct { id, record })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bytes::Bytes;
    use futures::StreamExt;
    use listing_core::{Category, FieldValue, ImageFile, User};

    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::services::auth_gate::{AuthGate, AuthStream};
    use crate::storage::MemoryObjectStore;

    async fn session(uid: &str) -> AuthenticatedSession {
        let user = User::new(uid);
        let provider = move || -> AuthStream {
            futures::stream::once(futures::future::ready(Some(user.clone()))).boxed()
        };
        let mut gate = AuthGate::activate(&provider);
        gate.resolved().await;
        gate.session().unwrap()
    }

    fn draft() -> ProductDraft {
        let mut draft = ProductDraft::new();
        draft.set_title("Tote");
        draft.set_price("35");
        draft.set_category(Some(Category::WomenBags));
        draft.set_status("in stock");
        draft.set_image(Some(ImageFile::new(
            "tote.jpg",
            Some("image/jpeg".into()),
            Bytes::from_static(b"jpg"),
        )));
        draft
    }

    #[tokio::test]
    async fn test_submit_uploads_and_persists() {
        let objects = Arc::new(MemoryObjectStore::new());
        let documents = Arc::new(MemoryDocumentStore::new());
        let workflow = SubmissionWorkflow::new(session("u1").await, objects.clone(), documents.clone());

        let submitted = workflow.submit(&draft()).await.unwrap();

        assert!(objects.get("images/tote.jpg").is_some());
        assert_eq!(submitted.record.image, "memory://images/tote.jpg");
        let stored = documents.documents(PRODUCTS_COLLECTION);
        assert_eq!(stored.len(), 1);
        let (id, doc) = stored.first().unwrap();
        assert_eq!(id, &submitted.id);
        assert_eq!(doc.get("userId").and_then(FieldValue::as_str), Some("u1"));
        assert_eq!(doc.get("category").and_then(FieldValue::as_str), Some("women-bags"));
    }

    #[tokio::test]
    async fn test_missing_image_makes_no_calls() {
        let objects = Arc::new(MemoryObjectStore::new());
        let documents = Arc::new(MemoryDocumentStore::new());
        let workflow = SubmissionWorkflow::new(session("u1").await, objects.clone(), documents.clone());

        let mut draft = draft();
        draft.set_image(None);
        let err = workflow.submit(&draft).await.unwrap_err();

        assert!(matches!(
            err,
            SubmissionError::Validation(ValidationError::MissingImage)
        ));
        assert!(objects.is_empty());
        assert!(documents.is_empty());
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(SubmissionResult::Success.message(), "Product added successfully!");

        let failed: Result<(), SubmissionError> = Err(ValidationError::MissingImage.into());
        let result = SubmissionResult::from(&failed);
        assert!(!result.is_success());
        assert_eq!(
            result.message(),
            "Error adding product: Please upload an image."
        );

        let storage: Result<(), SubmissionError> = Err(SubmissionError::Upload(
            StorageError::Backend("quota exceeded".into()),
        ));
        assert_eq!(
            SubmissionResult::from(&storage).message(),
            "Error adding product: storage backend error: quota exceeded"
        );
    }

    #[test]
    fn test_image_path_uses_raw_filename() {
        assert_eq!(image_path("a b.png"), "images/a b.png");
        assert_eq!(image_path("../x.png"), "images/../x.png");
    }
}
