//! Integration test support for the listing service.
//!
//! Provides recording collaborator doubles and fixtures used by the tests
//! in `tests/`. The doubles wrap the in-memory stores and log every call
//! into a shared [`CallLog`], so tests can assert which steps ran and in
//! which order.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p listing-integration-tests
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use listing_core::{Document, DocumentId, ImageFile, ProductDraft, User};
use listing_seller::db::{DocumentStore, MemoryDocumentStore, RepositoryError};
use listing_seller::services::{AuthGate, AuthStream, AuthenticatedSession};
use listing_seller::storage::{MemoryObjectStore, ObjectHandle, ObjectStore, StorageError};
use tokio::sync::Barrier;

/// A collaborator call, as seen by the doubles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Object upload to the given path.
    Upload(String),
    /// Public URL lookup for the given path.
    PublicUrl(String),
    /// Document creation in the given collection.
    CreateDocument(String),
}

/// Ordered log of collaborator calls, shared between doubles.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Object store double with injectable failures.
pub struct RecordingObjectStore {
    inner: MemoryObjectStore,
    log: CallLog,
    fail_upload: Option<String>,
    fail_url: Option<String>,
    upload_barrier: Option<Arc<Barrier>>,
}

impl RecordingObjectStore {
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: MemoryObjectStore::new(),
            log,
            fail_upload: None,
            fail_url: None,
            upload_barrier: None,
        }
    }

    /// Fail every upload with a backend error.
    #[must_use]
    pub fn failing_upload(mut self, message: &str) -> Self {
        self.fail_upload = Some(message.to_string());
        self
    }

    /// Fail every URL lookup with a backend error.
    #[must_use]
    pub fn failing_url(mut self, message: &str) -> Self {
        self.fail_url = Some(message.to_string());
        self
    }

    /// Hold each upload until `barrier` releases.
    #[must_use]
    pub fn with_upload_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.upload_barrier = Some(barrier);
        self
    }

    /// Objects currently stored.
    #[must_use]
    pub fn stored(&self) -> &MemoryObjectStore {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<ObjectHandle, StorageError> {
        self.log.push(Call::Upload(path.to_string()));
        if let Some(barrier) = &self.upload_barrier {
            barrier.wait().await;
        }
        if let Some(message) = &self.fail_upload {
            return Err(StorageError::Backend(message.clone()));
        }
        self.inner.upload(path, bytes, content_type).await
    }

    async fn public_url(&self, handle: &ObjectHandle) -> Result<String, StorageError> {
        self.log.push(Call::PublicUrl(handle.path().to_string()));
        if let Some(message) = &self.fail_url {
            return Err(StorageError::Backend(message.clone()));
        }
        self.inner.public_url(handle).await
    }
}

/// Document store double with an injectable failure.
pub struct RecordingDocumentStore {
    inner: MemoryDocumentStore,
    log: CallLog,
    fail: Option<String>,
}

impl RecordingDocumentStore {
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            log,
            fail: None,
        }
    }

    /// Reject every create with a constraint violation.
    #[must_use]
    pub fn failing(mut self, message: &str) -> Self {
        self.fail = Some(message.to_string());
        self
    }

    /// Documents currently stored.
    #[must_use]
    pub fn stored(&self) -> &MemoryDocumentStore {
        &self.inner
    }
}

#[async_trait]
impl DocumentStore for RecordingDocumentStore {
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, RepositoryError> {
        self.log.push(Call::CreateDocument(collection.to_string()));
        if let Some(message) = &self.fail {
            return Err(RepositoryError::Conflict(message.clone()));
        }
        self.inner.create_document(collection, document).await
    }
}

/// Auth stream that emits `user` once.
#[must_use]
pub fn single_notification(user: Option<User>) -> impl Fn() -> AuthStream + Send + Sync {
    move || futures::stream::once(futures::future::ready(user.clone())).boxed()
}

/// Session for `uid`, obtained through a resolved auth gate.
///
/// # Panics
///
/// Panics if the gate does not resolve to an authenticated user.
pub async fn authenticated_session(uid: &str) -> AuthenticatedSession {
    let mut gate = AuthGate::activate(&single_notification(Some(User::new(uid))));
    gate.resolved().await;
    gate.session().unwrap_or_else(|| panic!("gate for {uid} did not authenticate"))
}

/// A complete draft with a small PNG image named `filename`.
#[must_use]
pub fn draft_with_image(filename: &str) -> ProductDraft {
    let mut draft = ProductDraft::new();
    draft.set_title("Leather boots");
    draft.set_price("129.99");
    draft.set_category(Some(listing_core::Category::Shoes));
    draft.set_status("available");
    draft.set_image(Some(ImageFile::new(
        filename,
        Some("image/png".to_string()),
        Bytes::from_static(b"\x89PNG"),
    )));
    draft
}
