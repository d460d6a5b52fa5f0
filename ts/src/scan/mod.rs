//! Cursor-based scanner/paginator
//!
//! The scanner walks a fixed, ordered document list built at session
//! initialization, reading documents lazily one at a time and emitting
//! bounded batches of matching task lines. The cursor records the exact
//! resume point (document index + in-document match index), so repeated
//! fetches concatenate into the same sequence a single unbounded call
//! would produce.

mod cursor;
mod extract;
mod session;

pub use cursor::ScanCursor;
pub use extract::MatchExtractor;
pub use session::{Batch, ScanSession};

use thiserror::Error;

/// Scan session contract violations
///
/// Read failures during a batch are not errors: the offending document is
/// skipped and logged. The only failure a fetch can surface is misuse of
/// the session lifecycle.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan session is not initialized; call initialize_scan first")]
    SessionNotInitialized,
}
