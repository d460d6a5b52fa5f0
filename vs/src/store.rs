//! Document store trait and the filesystem-backed vault implementation

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::origins::{self, OriginSpec};

/// Unique identifier for a document: its `/`-separated path relative to the
/// vault root, e.g. `daily/2026-08-06.md`
pub type DocumentId = String;

/// Errors from the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Vault root does not exist: {}", root.display())]
    RootMissing { root: PathBuf },

    #[error("Document not found: {id}")]
    NotFound { id: DocumentId },

    #[error("Failed to read document: {id}")]
    Read {
        id: DocumentId,
        #[source]
        source: io::Error,
    },

    #[error("Origin {origin} unavailable: {reason}")]
    OriginUnavailable { origin: String, reason: String },

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Read-side collaborator contract for a document collection
///
/// Implementations never cache document content: every `read_document` call
/// reflects the state on disk (or in memory) at call time. Enumeration per
/// origin is independent - a failing origin returns an error without
/// affecting other origins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List candidate document ids contributed by one origin.
    ///
    /// The returned list is sorted ascending by id so that contributions
    /// are deterministic across calls.
    async fn list_documents(&self, origin: &OriginSpec) -> Result<Vec<DocumentId>, StoreError>;

    /// Read the full text of a document.
    async fn read_document(&self, id: &str) -> Result<String, StoreError>;

    /// Last-modified timestamp of a document.
    async fn document_recency(&self, id: &str) -> Result<DateTime<Utc>, StoreError>;
}

/// Filesystem-backed vault of markdown documents
#[derive(Debug)]
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    /// Open a vault rooted at an existing directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(StoreError::RootMissing { root });
        }
        debug!(?root, "VaultStore::open");
        Ok(Self { root })
    }

    /// The vault root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, id: &str) -> PathBuf {
        // Ids use '/' separators regardless of platform
        let mut path = self.root.clone();
        for part in id.split('/') {
            path.push(part);
        }
        path
    }
}

#[async_trait]
impl DocumentStore for VaultStore {
    async fn list_documents(&self, origin: &OriginSpec) -> Result<Vec<DocumentId>, StoreError> {
        debug!(origin = %origin, "VaultStore::list_documents");
        origins::enumerate(&self.root, origin)
    }

    async fn read_document(&self, id: &str) -> Result<String, StoreError> {
        let path = self.resolve(id);
        debug!(%id, "VaultStore::read_document");
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound { id: id.to_string() }),
            Err(e) => Err(StoreError::Read {
                id: id.to_string(),
                source: e,
            }),
        }
    }

    async fn document_recency(&self, id: &str) -> Result<DateTime<Utc>, StoreError> {
        let path = self.resolve(id);
        let meta = tokio::fs::metadata(&path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound { id: id.to_string() }
            } else {
                StoreError::Read {
                    id: id.to_string(),
                    source: e,
                }
            }
        })?;
        let modified = meta.modified().map_err(|e| StoreError::Read {
            id: id.to_string(),
            source: e,
        })?;
        Ok(DateTime::<Utc>::from(modified))
    }
}
