//! In-memory document store for tests and embedding
//!
//! Deterministic stand-in for [`VaultStore`](crate::VaultStore): documents
//! carry explicit modification timestamps, and individual documents can be
//! poisoned so reads fail while enumeration still lists them - exactly the
//! shape a scanner's fault-recovery path needs to exercise.

use std::collections::BTreeMap;
use std::io;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::origins::{self, OriginSpec};
use crate::store::{DocumentId, DocumentStore, StoreError};

struct MemoryDocument {
    content: String,
    modified: DateTime<Utc>,
    poisoned: bool,
}

/// In-memory [`DocumentStore`] keyed by document id
#[derive(Default)]
pub struct MemoryStore {
    docs: BTreeMap<DocumentId, MemoryDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document stamped with the current time
    pub fn insert(&mut self, id: impl Into<DocumentId>, content: impl Into<String>) {
        self.insert_with_recency(id, content, Utc::now());
    }

    /// Insert a document with an explicit last-modified timestamp
    pub fn insert_with_recency(
        &mut self,
        id: impl Into<DocumentId>,
        content: impl Into<String>,
        modified: DateTime<Utc>,
    ) {
        let id = id.into();
        debug!(%id, "MemoryStore::insert");
        self.docs.insert(
            id,
            MemoryDocument {
                content: content.into(),
                modified,
                poisoned: false,
            },
        );
    }

    /// Mark a document so that reads fail while enumeration still lists it
    pub fn poison(&mut self, id: &str) {
        if let Some(doc) = self.docs.get_mut(id) {
            doc.poisoned = true;
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn matches_origin(id: &str, doc: &MemoryDocument, origin: &OriginSpec) -> bool {
        match origin {
            OriginSpec::Subtree { path } => path.is_empty() || id.starts_with(&format!("{}/", path)),
            OriginSpec::DatePattern { pattern } => origins::stem_matches_date(id, pattern),
            OriginSpec::Tagged { tag } => {
                // Mirrors the filesystem origin's word-boundary rule
                let needle = format!("#{}", tag);
                doc.content.match_indices(&needle).any(|(start, _)| {
                    doc.content[start + needle.len()..]
                        .chars()
                        .next()
                        .map(|c| !c.is_alphanumeric() && c != '_')
                        .unwrap_or(true)
                })
            }
            OriginSpec::Glob { pattern } => glob::Pattern::new(pattern)
                .map(|p| p.matches(id))
                .unwrap_or(false),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self, origin: &OriginSpec) -> Result<Vec<DocumentId>, StoreError> {
        if let OriginSpec::Glob { pattern } = origin {
            // Surface bad patterns the same way the filesystem store does
            glob::Pattern::new(pattern).map_err(|e| StoreError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(self
            .docs
            .iter()
            .filter(|(id, doc)| Self::matches_origin(id, doc, origin))
            .map(|(id, _)| id.clone())
            .collect())
    }

    async fn read_document(&self, id: &str) -> Result<String, StoreError> {
        match self.docs.get(id) {
            None => Err(StoreError::NotFound { id: id.to_string() }),
            Some(doc) if doc.poisoned => Err(StoreError::Read {
                id: id.to_string(),
                source: io::Error::other("injected read failure"),
            }),
            Some(doc) => Ok(doc.content.clone()),
        }
    }

    async fn document_recency(&self, id: &str) -> Result<DateTime<Utc>, StoreError> {
        self.docs
            .get(id)
            .map(|doc| doc.modified)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }
}
