//! Candidate-set assembly: union, dedup, scope, deterministic order

use std::collections::HashSet;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};
use vaultstore::{DocumentId, DocumentStore, OriginSpec};

use super::ScopeFilters;

/// Assembles the ordered candidate document list for a scan session
///
/// Contributions are unioned in origin order with first occurrence winning,
/// an unavailable origin contributes nothing (logged, never fatal), and the
/// final list is stable-sorted by trailing filename component in descending
/// lexicographic order so ties keep their union order.
pub struct SourceAggregator {
    origins: Vec<OriginSpec>,
}

impl SourceAggregator {
    pub fn new(origins: Vec<OriginSpec>) -> Self {
        Self { origins }
    }

    pub fn origins(&self) -> &[OriginSpec] {
        &self.origins
    }

    /// Build the ordered candidate list as of now
    pub async fn list_documents(&self, store: &dyn DocumentStore, scope: &ScopeFilters) -> Vec<DocumentId> {
        self.list_documents_as_of(store, scope, Local::now().date_naive()).await
    }

    /// Build the ordered candidate list against an explicit "today",
    /// keeping period scoping deterministic for tests
    pub async fn list_documents_as_of(
        &self,
        store: &dyn DocumentStore,
        scope: &ScopeFilters,
        today: NaiveDate,
    ) -> Vec<DocumentId> {
        let mut seen: HashSet<DocumentId> = HashSet::new();
        let mut docs: Vec<DocumentId> = Vec::new();

        for origin in &self.origins {
            match store.list_documents(origin).await {
                Ok(ids) => {
                    debug!(origin = %origin, count = ids.len(), "origin contribution");
                    for id in ids {
                        if seen.insert(id.clone()) {
                            docs.push(id);
                        }
                    }
                }
                Err(e) => {
                    warn!(origin = %origin, error = %e, "origin unavailable, continuing without it");
                }
            }
        }

        if scope.current_period_only {
            docs = filter_current_period(docs, store, scope, today).await;
        }

        docs.sort_by(|a, b| trailing_name(b).cmp(trailing_name(a)));
        debug!(count = docs.len(), "aggregated document list");
        docs
    }
}

/// The filename component of an id, directory prefixes ignored
fn trailing_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Date carried in the filename stem, if the stem parses under `pattern`
fn stem_date(id: &str, pattern: &str) -> Option<NaiveDate> {
    let stem = Path::new(trailing_name(id)).file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, pattern).ok()
}

/// Keep documents belonging to the current period. A date-carrying filename
/// decides by itself; other documents fall back to their recency timestamp.
async fn filter_current_period(
    docs: Vec<DocumentId>,
    store: &dyn DocumentStore,
    scope: &ScopeFilters,
    today: NaiveDate,
) -> Vec<DocumentId> {
    let mut kept = Vec::new();
    for id in docs {
        if let Some(date) = stem_date(&id, &scope.date_pattern) {
            if scope.period.contains(date, today) {
                kept.push(id);
            }
            continue;
        }
        match store.document_recency(&id).await {
            Ok(ts) => {
                let date = ts.with_timezone(&Local).date_naive();
                if scope.period.contains(date, today) {
                    kept.push(id);
                }
            }
            Err(e) => {
                debug!(%id, error = %e, "recency unavailable, excluded from period scope");
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::Period;
    use chrono::{TimeZone, Utc};
    use vaultstore::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_union_dedup_and_descending_order() {
        let mut store = MemoryStore::new();
        store.insert("notes/alpha.md", "#task\n");
        store.insert("notes/beta.md", "");
        store.insert("zeta.md", "#task\n");

        let aggregator = SourceAggregator::new(vec![
            OriginSpec::Tagged { tag: "task".to_string() },
            OriginSpec::Subtree { path: String::new() },
        ]);

        let docs = aggregator
            .list_documents(&store, &ScopeFilters::default())
            .await;
        // Deduplicated, then descending by trailing name
        assert_eq!(docs, vec!["zeta.md", "notes/beta.md", "notes/alpha.md"]);
    }

    #[tokio::test]
    async fn test_failing_origin_tolerated() {
        let mut store = MemoryStore::new();
        store.insert("a.md", "");

        let aggregator = SourceAggregator::new(vec![
            OriginSpec::Glob {
                pattern: "[unclosed".to_string(),
            },
            OriginSpec::Subtree { path: String::new() },
        ]);

        let docs = aggregator
            .list_documents(&store, &ScopeFilters::default())
            .await;
        assert_eq!(docs, vec!["a.md"]);
    }

    #[tokio::test]
    async fn test_directory_prefix_ignored_in_ordering() {
        let mut store = MemoryStore::new();
        store.insert("zzz/2026-08-05.md", "");
        store.insert("aaa/2026-08-06.md", "");

        let aggregator = SourceAggregator::new(vec![OriginSpec::Subtree { path: String::new() }]);
        let docs = aggregator
            .list_documents(&store, &ScopeFilters::default())
            .await;
        // Later date first despite its directory sorting earlier
        assert_eq!(docs, vec!["aaa/2026-08-06.md", "zzz/2026-08-05.md"]);
    }

    #[tokio::test]
    async fn test_period_scope_by_filename_stem() {
        let mut store = MemoryStore::new();
        store.insert("daily/2026-08-06.md", "");
        store.insert("daily/2026-08-05.md", "");

        let aggregator = SourceAggregator::new(vec![OriginSpec::Subtree { path: String::new() }]);
        let scope = ScopeFilters::current_period(Period::Day);

        let docs = aggregator
            .list_documents_as_of(&store, &scope, date("2026-08-06"))
            .await;
        assert_eq!(docs, vec!["daily/2026-08-06.md"]);
    }

    #[tokio::test]
    async fn test_period_scope_falls_back_to_recency() {
        let mut store = MemoryStore::new();
        let today_noon = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let last_year = Utc.with_ymd_and_hms(2025, 8, 6, 12, 0, 0).unwrap();
        store.insert_with_recency("fresh.md", "", today_noon);
        store.insert_with_recency("stale.md", "", last_year);

        let aggregator = SourceAggregator::new(vec![OriginSpec::Subtree { path: String::new() }]);
        let scope = ScopeFilters::current_period(Period::Month);

        let docs = aggregator
            .list_documents_as_of(&store, &scope, date("2026-08-06"))
            .await;
        assert_eq!(docs, vec!["fresh.md"]);
    }

    #[tokio::test]
    async fn test_dated_name_overrides_recency() {
        // A stale-dated name is excluded even when the file was touched today
        let mut store = MemoryStore::new();
        store.insert("2020-01-01.md", "");

        let aggregator = SourceAggregator::new(vec![OriginSpec::Subtree { path: String::new() }]);
        let scope = ScopeFilters::current_period(Period::Day);

        let docs = aggregator
            .list_documents_as_of(&store, &scope, date("2026-08-06"))
            .await;
        assert!(docs.is_empty());
    }
}
