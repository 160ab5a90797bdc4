//! Binary object storage.
//!
//! Uploaded product images go through the [`ObjectStore`] trait. Two backends
//! are provided:
//!
//! - [`LocalObjectStore`] - files on disk, served by the HTTP layer under a
//!   public URL prefix
//! - [`MemoryObjectStore`] - in-process, for tests and local development
//!
//! Neither backend protects against overwrites: uploading to an existing path
//! replaces the object.

pub mod local;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The object path is empty or escapes the store root.
    #[error("invalid object path: {0}")]
    InvalidPath(String),

    /// No object exists at the path.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The public URL could not be built.
    #[error("invalid object URL: {0}")]
    Url(#[from] url::ParseError),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Reference to an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle {
    path: String,
    size: usize,
}

impl ObjectHandle {
    /// Create a handle for an object at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, size: usize) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Store-relative path of the object.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Size of the uploaded contents in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

/// Binary blob storage with public retrieval URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` at `path`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the path is rejected or the write fails.
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<ObjectHandle, StorageError>;

    /// Resolve the public retrieval URL of an uploaded object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the object no longer exists.
    async fn public_url(&self, handle: &ObjectHandle) -> Result<String, StorageError>;
}
