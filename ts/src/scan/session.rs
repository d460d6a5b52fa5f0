//! Scan session: ordered document list + cursor + bounded batch fetches

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;
use vaultstore::{DocumentId, DocumentStore};

use super::cursor::ScanCursor;
use super::extract::MatchExtractor;
use super::ScanError;
use crate::domain::TaskLine;
use crate::filter::StatusPredicate;
use crate::sources::{ScopeFilters, SourceAggregator};

/// One bounded result set from a single fetch call
///
/// `has_more` is intentionally conservative: it is `true` whenever the
/// cursor has not reached the end of the document list, even when the
/// remaining documents turn out to contain no matches.
#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    pub tasks: Vec<TaskLine>,
    pub has_more: bool,
}

/// A scan session: the ordered document list fixed at initialization plus
/// the resume cursor.
///
/// Sessions are driven by one logical caller; both `initialize_scan` and
/// `fetch_next_batch` take `&mut self`, so overlapping calls on one session
/// do not compile. Sharing a session across tasks requires external
/// serialization, which is the caller's obligation.
pub struct ScanSession {
    store: Arc<dyn DocumentStore>,
    aggregator: SourceAggregator,
    extractor: MatchExtractor,
    session_id: String,
    documents: Vec<DocumentId>,
    cursor: ScanCursor,
    ready: bool,
}

impl ScanSession {
    /// Create an uninitialized session. Fetching before `initialize_scan`
    /// is a contract violation and fails fast.
    pub fn new(store: Arc<dyn DocumentStore>, aggregator: SourceAggregator) -> Self {
        Self {
            store,
            aggregator,
            extractor: MatchExtractor::new(),
            session_id: Uuid::now_v7().to_string(),
            documents: Vec::new(),
            cursor: ScanCursor::START,
            ready: false,
        }
    }

    /// Rebuild the ordered document list and reset the cursor to the start.
    ///
    /// This is the only operation that rebuilds the list or rewinds the
    /// cursor; the list then stays fixed for the session's lifetime.
    pub async fn initialize_scan(&mut self, scope: &ScopeFilters) {
        self.session_id = Uuid::now_v7().to_string();
        self.documents = self.aggregator.list_documents(self.store.as_ref(), scope).await;
        self.cursor = ScanCursor::START;
        self.ready = true;
        debug!(
            session = %self.session_id,
            documents = self.documents.len(),
            "initialize_scan"
        );
    }

    /// Clear the cursor and document list. The session must be
    /// re-initialized before the next fetch.
    pub fn reset_scan(&mut self) {
        debug!(session = %self.session_id, "reset_scan");
        self.documents.clear();
        self.cursor = ScanCursor::START;
        self.ready = false;
    }

    /// The resume position the next fetch will start from
    pub fn cursor(&self) -> ScanCursor {
        self.cursor
    }

    /// The ordered candidate document list (empty until initialized)
    pub fn documents(&self) -> &[DocumentId] {
        &self.documents
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Fetch the next batch, advancing the session cursor.
    pub async fn fetch_next_batch(
        &mut self,
        target: usize,
        predicate: &StatusPredicate,
    ) -> Result<Batch, ScanError> {
        let (batch, next) = self.fetch_from(self.cursor, target, predicate).await?;
        self.cursor = next;
        Ok(batch)
    }

    /// Scan from an explicit cursor without touching session state,
    /// returning the batch and the cursor to resume from.
    ///
    /// Documents are read strictly one at a time, in list order; a read
    /// failure skips that document (logged) and never fails the batch. The
    /// batch holds at most `target` tasks, fewer only when the document
    /// list is exhausted.
    pub async fn fetch_from(
        &self,
        cursor: ScanCursor,
        target: usize,
        predicate: &StatusPredicate,
    ) -> Result<(Batch, ScanCursor), ScanError> {
        if !self.ready {
            return Err(ScanError::SessionNotInitialized);
        }

        debug!(session = %self.session_id, %cursor, target, "fetch_from");

        let mut tasks: Vec<TaskLine> = Vec::new();
        let mut next = cursor;

        while next.document_index < self.documents.len() && tasks.len() < target {
            let id = &self.documents[next.document_index];

            let text = match self.store.read_document(id).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(session = %self.session_id, %id, error = %e, "skipping unreadable document");
                    next = next.next_document();
                    continue;
                }
            };

            let matches = self.extractor.matches(id, &text, predicate);
            // Resume mid-document only for the document the cursor points at
            let offset = next.match_index.min(matches.len());
            let available = matches.len() - offset;
            let take = available.min(target - tasks.len());
            tasks.extend(matches.into_iter().skip(offset).take(take));

            if take < available {
                // Mid-document stop: the batch is full with matches left
                // unconsumed. Resume inside this document.
                let resume = next.at_match(offset + take);
                debug!(session = %self.session_id, cursor = %resume, count = tasks.len(), "batch full mid-document");
                return Ok((Batch { tasks, has_more: true }, resume));
            }

            next = next.next_document();
        }

        let has_more = next.document_index < self.documents.len();
        debug!(session = %self.session_id, cursor = %next, count = tasks.len(), has_more, "batch complete");
        Ok((Batch { tasks, has_more }, next))
    }
}
