//! Integration tests for taskscan
//!
//! End-to-end behavior of the engine over an on-disk vault: aggregation,
//! paged scanning, filtering, ranking and fault recovery.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use taskscan::config::{Config, VaultConfig};
use taskscan::domain::RankTier;
use taskscan::engine::TaskIndex;
use taskscan::scan::ScanError;
use taskscan::sources::{Period, ScopeFilters};
use tempfile::TempDir;
use vaultstore::VaultStore;

fn write_doc(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
}

fn vault() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write_doc(
        temp.path(),
        "projects/kitchen.md",
        "# Kitchen\n- [ ] buy paint\n- [/] sand cabinets\n- [x] measure walls\n",
    );
    write_doc(
        temp.path(),
        "projects/garden.md",
        "- [!] water tomatoes\nprose in between\n- [ ] order seeds\n",
    );
    write_doc(temp.path(), "inbox.md", "- [?] dentist appointment\n");
    temp
}

fn config_for(temp: &TempDir) -> Config {
    Config {
        vault: VaultConfig {
            root: temp.path().to_path_buf(),
        },
        ..Config::default()
    }
}

fn index_for(temp: &TempDir) -> TaskIndex {
    let store = Arc::new(VaultStore::open(temp.path()).unwrap());
    TaskIndex::new(store, &config_for(temp))
}

// =============================================================================
// Scanning
// =============================================================================

#[tokio::test]
async fn test_paged_scan_matches_single_unbounded_scan() {
    let temp = vault();

    let mut index = index_for(&temp);
    index.initialize_scan(&ScopeFilters::default()).await;
    let full = index.fetch_all().await.unwrap();
    assert_eq!(full.len(), 5); // 'x' excluded by default statuses

    for page in 1..=6 {
        let mut index = index_for(&temp);
        index.initialize_scan(&ScopeFilters::default()).await;
        let mut collected = Vec::new();
        loop {
            let batch = index.fetch_next_batch(page).await.unwrap();
            assert!(batch.tasks.len() <= page);
            collected.extend(batch.tasks);
            if !batch.has_more {
                break;
            }
        }
        assert_eq!(collected, full, "page size {page}");
    }
}

#[tokio::test]
async fn test_document_order_is_descending_by_trailing_name() {
    let temp = vault();
    let mut index = index_for(&temp);
    index.initialize_scan(&ScopeFilters::default()).await;

    assert_eq!(
        index.documents(),
        ["projects/kitchen.md", "inbox.md", "projects/garden.md"]
    );
}

#[tokio::test]
async fn test_status_filtering_excludes_unlisted_symbols() {
    let temp = TempDir::new().unwrap();
    write_doc(temp.path(), "a.md", "- [ ] open\n- [x] done\n- [?] question\n");

    let store = Arc::new(VaultStore::open(temp.path()).unwrap());
    let mut config = config_for(&temp);
    config.vault.root = temp.path().to_path_buf();
    config.statuses = [(' ', true), ('x', true)].into_iter().collect();

    let mut index = TaskIndex::new(store, &config);
    index.initialize_scan(&ScopeFilters::default()).await;
    let tasks = index.fetch_all().await.unwrap();

    let statuses: Vec<char> = tasks.iter().map(|t| t.status).collect();
    assert_eq!(statuses, [' ', 'x']);
}

#[tokio::test]
async fn test_deleted_document_is_skipped_not_fatal() {
    let temp = vault();
    let mut index = index_for(&temp);
    index.initialize_scan(&ScopeFilters::default()).await;
    assert_eq!(index.documents().len(), 3);

    // The list is fixed at initialization; deleting a file afterwards makes
    // its read fail mid-scan
    fs::remove_file(temp.path().join("inbox.md")).unwrap();

    let tasks = index.fetch_all().await.unwrap();
    assert!(tasks.iter().all(|t| t.document_id != "inbox.md"));
    assert_eq!(tasks.len(), 4); // kitchen 2 + garden 2, inbox contributes nothing
}

#[tokio::test]
async fn test_fetch_after_reset_without_initialize_fails() {
    let temp = vault();
    let mut index = index_for(&temp);
    index.initialize_scan(&ScopeFilters::default()).await;
    index.reset_scan();

    assert!(matches!(
        index.fetch_next_batch(10).await,
        Err(ScanError::SessionNotInitialized)
    ));

    // Re-initializing recovers the session
    index.initialize_scan(&ScopeFilters::default()).await;
    assert!(index.fetch_next_batch(10).await.is_ok());
}

#[tokio::test]
async fn test_current_period_scope_keeps_todays_daily_note() {
    let temp = TempDir::new().unwrap();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    write_doc(temp.path(), &format!("daily/{today}.md"), "- [ ] today's task\n");
    write_doc(temp.path(), "daily/2020-01-01.md", "- [ ] ancient task\n");

    let mut index = index_for(&temp);
    index.initialize_scan(&ScopeFilters::current_period(Period::Day)).await;

    let tasks = index.fetch_all().await.unwrap();
    let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["today's task"]);
}

// =============================================================================
// Ranking
// =============================================================================

#[tokio::test]
async fn test_top_task_prefers_first_nonempty_tier() {
    let temp = vault();
    let mut index = index_for(&temp);
    index.initialize_scan(&ScopeFilters::default()).await;
    let tasks = index.fetch_all().await.unwrap();

    // Default tiers: '/' before '!' before '+'. The vault has one '/' task.
    let outcome = index.rank(&tasks).await;
    let top = outcome.top.unwrap();
    assert_eq!(top.task.text, "sand cabinets");
    assert_eq!(top.rank, Some(1));

    // '!' task still carries its tier label
    let urgent = outcome
        .ranked
        .iter()
        .find(|r| r.task.status == '!')
        .unwrap();
    assert_eq!(urgent.rank, Some(2));
    assert!(!urgent.is_top);
}

#[tokio::test]
async fn test_recency_breaks_ties_within_tier() {
    let temp = TempDir::new().unwrap();
    write_doc(temp.path(), "older.md", "- [!] older urgent\n");
    // Ensure distinct mtimes even on coarse filesystem clocks
    std::thread::sleep(std::time::Duration::from_millis(1200));
    write_doc(temp.path(), "newer.md", "- [!] newer urgent\n");

    let mut index = index_for(&temp);
    index.initialize_scan(&ScopeFilters::default()).await;
    let tasks = index.fetch_all().await.unwrap();

    let outcome = index.rank(&tasks).await;
    assert_eq!(outcome.top.unwrap().task.text, "newer urgent");
}

#[tokio::test]
async fn test_no_tiered_task_means_no_top() {
    let temp = TempDir::new().unwrap();
    write_doc(temp.path(), "a.md", "- [ ] plain todo\n");

    let store = Arc::new(VaultStore::open(temp.path()).unwrap());
    let mut config = config_for(&temp);
    config.tiers = vec![RankTier::new('!', 1)];

    let mut index = TaskIndex::new(store, &config);
    index.initialize_scan(&ScopeFilters::default()).await;
    let tasks = index.fetch_all().await.unwrap();

    let outcome = index.rank(&tasks).await;
    assert!(outcome.top.is_none());
    assert_eq!(outcome.ranked.len(), 1);
}
