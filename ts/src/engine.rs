//! Engine facade: one type wiring config into scanning and ranking
//!
//! `TaskIndex` is the surface a calling layer drives: initialize a scan
//! session, pull bounded batches, reset, and rank whatever has been loaded
//! so far. It owns the compiled predicate and the session so callers deal
//! only in tasks and batches.

use std::sync::Arc;

use tracing::debug;
use vaultstore::{DocumentId, DocumentStore};

use crate::config::Config;
use crate::domain::TaskLine;
use crate::filter::{StatusPredicate, compile_filter};
use crate::rank::{RankEvent, RankOutcome, Ranker};
use crate::scan::{Batch, ScanError, ScanSession};
use crate::sources::{ScopeFilters, SourceAggregator};

pub struct TaskIndex {
    predicate: StatusPredicate,
    page_size: usize,
    session: ScanSession,
    ranker: Ranker,
}

impl TaskIndex {
    /// Build an engine over `store`, wired from `config`
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        let predicate = compile_filter(&config.statuses);
        let aggregator = SourceAggregator::new(config.sources.clone());
        let session = ScanSession::new(Arc::clone(&store), aggregator);
        let ranker = Ranker::new(store, config.tiers.clone());
        debug!(page_size = config.scan.page_size, "TaskIndex::new");
        Self {
            predicate,
            page_size: config.scan.page_size,
            session,
            ranker,
        }
    }

    /// Configured default batch target
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The ordered candidate document list of the current session
    pub fn documents(&self) -> &[DocumentId] {
        self.session.documents()
    }

    /// Start (or restart) a scan session under `scope`
    pub async fn initialize_scan(&mut self, scope: &ScopeFilters) {
        self.session.initialize_scan(scope).await;
    }

    /// Fetch the next bounded batch of matching tasks
    pub async fn fetch_next_batch(&mut self, target: usize) -> Result<Batch, ScanError> {
        self.session.fetch_next_batch(target, &self.predicate).await
    }

    /// Drain the session: fetch until the document list is exhausted
    pub async fn fetch_all(&mut self) -> Result<Vec<TaskLine>, ScanError> {
        let mut tasks = Vec::new();
        loop {
            let batch = self.fetch_next_batch(self.page_size).await?;
            tasks.extend(batch.tasks);
            if !batch.has_more {
                return Ok(tasks);
            }
        }
    }

    /// Clear the session; it must be re-initialized before the next fetch
    pub fn reset_scan(&mut self) {
        self.session.reset_scan();
    }

    /// Rank a snapshot of loaded tasks
    pub async fn rank(&self, tasks: &[TaskLine]) -> RankOutcome {
        self.ranker.rank(tasks).await
    }

    /// Subscribe to top-task change notifications
    pub fn subscribe_rank_events(&self) -> tokio::sync::broadcast::Receiver<RankEvent> {
        self.ranker.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultConfig;
    use vaultstore::MemoryStore;

    fn config() -> Config {
        Config {
            vault: VaultConfig {
                root: std::env::temp_dir(),
            },
            ..Config::default()
        }
    }

    fn store() -> Arc<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert("b.md", "- [ ] beta\n- [!] urgent beta\n");
        store.insert("a.md", "- [ ] alpha\n- [x] finished\n");
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_scan_rank_round_trip() {
        let mut index = TaskIndex::new(store(), &config());
        index.initialize_scan(&ScopeFilters::default()).await;

        let tasks = index.fetch_all().await.unwrap();
        // 'x' is excluded by the default statuses
        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["beta", "urgent beta", "alpha"]);

        let outcome = index.rank(&tasks).await;
        assert_eq!(outcome.top.unwrap().task.text, "urgent beta");
    }

    #[tokio::test]
    async fn test_fetch_after_reset_is_contract_violation() {
        let mut index = TaskIndex::new(store(), &config());
        index.initialize_scan(&ScopeFilters::default()).await;
        index.reset_scan();

        assert!(matches!(
            index.fetch_next_batch(5).await,
            Err(ScanError::SessionNotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_rank_events_visible_through_facade() {
        let mut index = TaskIndex::new(store(), &config());
        let mut rx = index.subscribe_rank_events();

        index.initialize_scan(&ScopeFilters::default()).await;
        let tasks = index.fetch_all().await.unwrap();
        index.rank(&tasks).await;

        assert!(matches!(rx.recv().await.unwrap(), RankEvent::TopChanged { .. }));
    }
}
