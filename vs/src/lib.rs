//! VaultStore - markdown vault document store
//!
//! Serves a directory of markdown documents ("the vault") to scanning
//! engines: enumerate candidate documents per declarative origin, read
//! document text lazily, and report last-modified timestamps.
//!
//! # Architecture
//!
//! ```text
//! vault/
//! ├── daily/
//! │   ├── 2026-08-05.md      # DatePattern origin ("%Y-%m-%d")
//! │   └── 2026-08-06.md
//! ├── projects/
//! │   └── kitchen.md         # Subtree origin ("projects")
//! └── inbox.md               # Tagged origin ("#task" in content)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vaultstore::{DocumentStore, OriginSpec, VaultStore};
//!
//! let store = VaultStore::open("vault")?;
//! let ids = store.list_documents(&OriginSpec::Subtree { path: "daily".into() }).await?;
//! let text = store.read_document(&ids[0]).await?;
//! let modified = store.document_recency(&ids[0]).await?;
//! ```

pub mod cli;
pub mod config;
pub mod mem;
mod origins;
mod store;

pub use mem::MemoryStore;
pub use origins::OriginSpec;
pub use store::{DocumentId, DocumentStore, StoreError, VaultStore};

/// File extension served by the vault
pub const MARKDOWN_EXTENSION: &str = "md";
