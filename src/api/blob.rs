//! Blob storage behind the upload endpoint.
//!
//! [`LocalBlobStore`] keeps blobs as files under `<root>/<container>/<name>`
//! and hands out URLs under a public base. A [`BlobListener`] is notified
//! after every write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Invalid blob name: {0}")]
    InvalidName(String),

    #[error("Invalid public base URL '{url}'")]
    InvalidUrl { url: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEvent {
    pub container: String,
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Creates the container if it does not exist yet.
    async fn ensure_container(&self, container: &str) -> Result<(), BlobError>;

    /// Writes (or overwrites) a blob and returns its URL.
    async fn put(&self, container: &str, name: &str, bytes: &[u8]) -> Result<String, BlobError>;
}

#[async_trait]
pub trait BlobListener: Send + Sync {
    async fn blob_written(&self, event: &BlobEvent);
}

/// Logs every written blob.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBlobListener;

#[async_trait]
impl BlobListener for LoggingBlobListener {
    async fn blob_written(&self, event: &BlobEvent) {
        info!(
            container = %event.container,
            name = %event.name,
            size = event.size,
            content_type = event.content_type.as_deref().unwrap_or("unknown"),
            "Blob written"
        );
    }
}

#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, container: &str, name: &str) -> Result<PathBuf, BlobError> {
        let mut path = self.root.join(checked_segment(container)?);
        for segment in name.split('/') {
            path.push(checked_segment(segment)?);
        }
        Ok(path)
    }

    fn blob_url(&self, container: &str, name: &str) -> Result<String, BlobError> {
        let invalid = || BlobError::InvalidUrl {
            url: self.public_base_url.clone(),
        };
        let mut url = Url::parse(&self.public_base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(container)
            .extend(name.split('/'));
        Ok(url.to_string())
    }
}

fn checked_segment(segment: &str) -> Result<&str, BlobError> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
        return Err(BlobError::InvalidName(segment.to_string()));
    }
    Ok(segment)
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn ensure_container(&self, container: &str) -> Result<(), BlobError> {
        let path = self.root.join(checked_segment(container)?);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| BlobError::Io { path, source })
    }

    async fn put(&self, container: &str, name: &str, bytes: &[u8]) -> Result<String, BlobError> {
        let path = self.blob_path(container, name)?;
        let url = self.blob_url(container, name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| BlobError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| BlobError::Io { path, source })?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_under_container_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost:5000/blobs/");
        store.ensure_container("documents").await.unwrap();

        let url = store.put("documents", "pdf/a b.pdf", b"one").await.unwrap();
        store.put("documents", "pdf/a b.pdf", b"two").await.unwrap();

        assert_eq!(url, "http://localhost:5000/blobs/documents/pdf/a%20b.pdf");
        let written = std::fs::read(dir.path().join("documents/pdf/a b.pdf")).unwrap();
        assert_eq!(written, b"two");
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost/blobs");
        let err = store.put("documents", "pdf/../../etc", b"x").await.unwrap_err();
        assert!(matches!(err, BlobError::InvalidName(_)));
    }
}
