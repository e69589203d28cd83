//! Read-through local-disk cache for the external fetchers (spec.md §5
//! "Shared resources"): `"The local XML cache (downloaded files keyed by
//! `<collection>/<filename>`) is a read-through cache backing an optional
//! remote blob store; misses fetch, stores both locally and remotely. Cache
//! reads and writes are idempotent."`
//!
//! This crate implements the local tier; a remote blob-store tier is a
//! deployment concern left to the caller (wrap [`FsCache`] with another
//! layer implementing the same `get_or_fetch` shape).

use crate::error::FetchError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A read-through cache keyed by `<collection>/<filename>` under a root
/// directory.
#[derive(Debug, Clone)]
pub struct FsCache {
    root: PathBuf,
}

impl FsCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, collection: &str, filename: &str) -> PathBuf {
        self.root.join(collection).join(filename)
    }

    /// Returns the cached bytes if present, else `None`.
    pub async fn get(&self, collection: &str, filename: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let path = self.path_for(collection, filename);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FetchError::Cache {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Stores bytes under `<collection>/<filename>`, creating parent
    /// directories as needed. Idempotent: writing the same bytes twice is a
    /// no-op in effect.
    pub async fn put(&self, collection: &str, filename: &str, bytes: &[u8]) -> Result<(), FetchError> {
        let path = self.path_for(collection, filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| FetchError::Cache {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        fs::write(&path, bytes).await.map_err(|e| FetchError::Cache {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Runs `fetch` only on a cache miss, persisting the result on a hit.
    /// `fetch` returning `Ok(None)` (a 404) is not cached, since a title
    /// not yet published at a tag may later appear.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        collection: &str,
        filename: &str,
        fetch: F,
    ) -> Result<Option<Vec<u8>>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Option<Vec<u8>>, FetchError>>,
    {
        if let Some(cached) = self.get(collection, filename).await? {
            return Ok(Some(cached));
        }
        match fetch().await? {
            Some(bytes) => {
                self.put(collection, filename, &bytes).await?;
                Ok(Some(bytes))
            }
            None => Ok(None),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
