//! In-process object store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use super::{ObjectHandle, ObjectStore, StorageError};

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Object store backed by a `HashMap`.
///
/// Public URLs use the `memory://` scheme and the object path verbatim.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the object at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<ObjectHandle, StorageError> {
        if path.is_empty() {
            return Err(StorageError::InvalidPath(path.to_owned()));
        }

        let handle = ObjectHandle::new(path, bytes.len());
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                path.to_owned(),
                StoredObject {
                    bytes,
                    content_type: content_type.map(str::to_owned),
                },
            );
        Ok(handle)
    }

    async fn public_url(&self, handle: &ObjectHandle) -> Result<String, StorageError> {
        if self.get(handle.path()).is_none() {
            return Err(StorageError::NotFound(handle.path().to_owned()));
        }
        Ok(format!("memory://{}", handle.path()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_url() {
        let store = MemoryObjectStore::new();
        let handle = store
            .upload("images/a.png", Bytes::from_static(b"abc"), Some("image/png"))
            .await
            .unwrap();
        assert_eq!(handle.size(), 3);
        assert_eq!(
            store.public_url(&handle).await.unwrap(),
            "memory://images/a.png"
        );
        assert_eq!(
            store.get("images/a.png").unwrap().content_type.as_deref(),
            Some("image/png")
        );
    }

    #[tokio::test]
    async fn test_same_path_overwrites() {
        let store = MemoryObjectStore::new();
        store
            .upload("images/a.png", Bytes::from_static(b"first"), None)
            .await
            .unwrap();
        store
            .upload("images/a.png", Bytes::from_static(b"second"), None)
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("images/a.png").unwrap().bytes, "second");
    }

    #[tokio::test]
    async fn test_url_for_missing_object() {
        let store = MemoryObjectStore::new();
        let handle = ObjectHandle::new("images/ghost.png", 0);
        let err = store.public_url(&handle).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
