//! Taskscan - incremental task discovery, pagination and ranking
//!
//! Taskscan indexes a mutable markdown vault for status-tagged task lines
//! and surfaces them in bounded pages while tracking a priority-ranked top
//! task. Documents are read lazily, one at a time, so repeated "load more"
//! calls stay cheap and correct against a changing corpus: no task is
//! skipped or duplicated across batches of one scan session.
//!
//! # Core Concepts
//!
//! - **Fixed session, lazy reads**: the candidate document list is built
//!   once per session; content is read per batch, never cached
//! - **Explicit cursor**: the resume point is an immutable value, so
//!   pagination is deterministic and testable
//! - **Closed-world filtering**: a status symbol is included only when the
//!   filter set says so
//! - **Snapshot ranking**: ranking takes a snapshot and returns a new
//!   annotated snapshot; nothing mutates caller-owned data
//!
//! # Modules
//!
//! - [`filter`] - status-filter compilation and structural line parsing
//! - [`sources`] - origin aggregation into one ordered document list
//! - [`scan`] - the cursor-based scanner/paginator
//! - [`rank`] - tiered top-task selection with recency tie-break
//! - [`engine`] - the facade a calling layer drives
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod filter;
pub mod rank;
pub mod scan;
pub mod sources;

// Re-export commonly used types
pub use config::{Config, ScanConfig, VaultConfig};
pub use domain::{RankTier, RankedTask, TaskLine};
pub use engine::TaskIndex;
pub use filter::{StatusFilterSet, StatusPredicate, compile_filter};
pub use rank::{RankEvent, RankEvents, RankOutcome, Ranker};
pub use scan::{Batch, MatchExtractor, ScanCursor, ScanError, ScanSession};
pub use sources::{Period, ScopeFilters, SourceAggregator};
