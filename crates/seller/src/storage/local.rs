//! Filesystem-backed object store.
//!
//! Objects are written below a root directory and served by the HTTP layer
//! (`/uploads`) or any static host pointed at the same directory.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::instrument;
use url::Url;

use super::{ObjectHandle, ObjectStore, StorageError};

/// Object store writing files under `root`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base: Url,
}

impl LocalObjectStore {
    /// Create a store rooted at `root` whose objects are served from `public_base`.
    ///
    /// A trailing slash is added to the base URL path if missing so object
    /// paths resolve beneath it.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, mut public_base: Url) -> Self {
        if !public_base.path().ends_with('/') {
            let path = format!("{}/", public_base.path());
            public_base.set_path(&path);
        }

        Self {
            root: root.into(),
            public_base,
        }
    }

    /// Directory objects are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let contained = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !contained {
            return Err(StorageError::InvalidPath(path.to_owned()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> Result<ObjectHandle, StorageError> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!(target = %target.display(), "object written");
        Ok(ObjectHandle::new(path, bytes.len()))
    }

    async fn public_url(&self, handle: &ObjectHandle) -> Result<String, StorageError> {
        let target = self.resolve(handle.path())?;
        if !tokio::fs::try_exists(&target).await? {
            return Err(StorageError::NotFound(handle.path().to_owned()));
        }

        let encoded = handle
            .path()
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");

        Ok(self.public_base.join(&encoded)?.to_string())
    }
}
