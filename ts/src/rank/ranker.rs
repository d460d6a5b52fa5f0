//! Top-task selection across configured tiers

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use vaultstore::{DocumentId, DocumentStore};

use super::events::{RankEvent, RankEvents};
use crate::domain::{RankTier, RankedTask, TaskLine};

/// Result of one ranking pass: a fresh annotated snapshot plus the winner
#[derive(Debug, Clone)]
pub struct RankOutcome {
    pub ranked: Vec<RankedTask>,
    pub top: Option<RankedTask>,
}

/// Selects the single highest-precedence, most-recently-modified task
///
/// Tiers are walked in ascending priority order. Every tier with at least
/// one match annotates its members with the tier's rank; the first
/// non-empty tier also selects the winner by document recency, and later
/// tiers never overwrite it.
pub struct Ranker {
    store: Arc<dyn DocumentStore>,
    tiers: Vec<RankTier>,
    events: RankEvents,
}

impl Ranker {
    pub fn new(store: Arc<dyn DocumentStore>, mut tiers: Vec<RankTier>) -> Self {
        tiers.sort_by_key(|tier| tier.priority);
        Self {
            store,
            tiers,
            events: RankEvents::with_default_capacity(),
        }
    }

    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    /// Subscribe to top-task change notifications
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RankEvent> {
        self.events.subscribe()
    }

    /// Rank a snapshot of the tasks loaded so far.
    ///
    /// The input is read-only; annotations land on a new snapshot. Emits
    /// `TopChanged` or `TopCleared` after every pass.
    pub async fn rank(&self, tasks: &[TaskLine]) -> RankOutcome {
        // Fresh annotations every pass - nothing carries over
        let mut ranked: Vec<RankedTask> = tasks.iter().cloned().map(RankedTask::unranked).collect();
        let mut recency_cache: HashMap<DocumentId, DateTime<Utc>> = HashMap::new();
        let mut winner: Option<usize> = None;

        for tier in &self.tiers {
            let members: Vec<usize> = ranked
                .iter()
                .enumerate()
                .filter(|(_, r)| r.task.status == tier.symbol)
                .map(|(i, _)| i)
                .collect();
            if members.is_empty() {
                continue;
            }

            debug!(tier = %tier, members = members.len(), "tier annotated");
            for &i in &members {
                ranked[i].rank = Some(tier.priority);
            }

            if winner.is_none() {
                let mut by_recency: Vec<(usize, DateTime<Utc>)> = Vec::with_capacity(members.len());
                for &i in &members {
                    let ts = self.recency_of(&mut recency_cache, &ranked[i].task.document_id).await;
                    by_recency.push((i, ts));
                }
                // Stable sort: equal timestamps keep scan order
                by_recency.sort_by(|a, b| b.1.cmp(&a.1));
                winner = by_recency.first().map(|&(i, _)| i);
            }
        }

        if let Some(i) = winner {
            ranked[i].is_top = true;
        }
        let top = winner.map(|i| ranked[i].clone());

        match &top {
            Some(task) => {
                debug!(location = %task.task.location(), "top task selected");
                self.events.emit(RankEvent::TopChanged { task: task.clone() });
            }
            None => {
                debug!("no tier matched, top task cleared");
                self.events.emit(RankEvent::TopCleared);
            }
        }

        RankOutcome { ranked, top }
    }

    async fn recency_of(&self, cache: &mut HashMap<DocumentId, DateTime<Utc>>, id: &str) -> DateTime<Utc> {
        if let Some(ts) = cache.get(id) {
            return *ts;
        }
        let ts = match self.store.document_recency(id).await {
            Ok(ts) => ts,
            Err(e) => {
                warn!(%id, error = %e, "recency unavailable, treating as epoch");
                DateTime::UNIX_EPOCH
            }
        };
        cache.insert(id.to_string(), ts);
        ts
    }
}
