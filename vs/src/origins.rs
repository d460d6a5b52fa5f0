//! Declarative document origins and their filesystem enumeration
//!
//! An origin is one independent source of candidate document ids. Origins
//! are configuration data (serde-tagged), so callers can compose however
//! many they need without touching enumeration code.

use std::path::Path;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use grep_regex::RegexMatcher;
use grep_searcher::sinks::UTF8;
use grep_searcher::{BinaryDetection, SearcherBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::MARKDOWN_EXTENSION;
use crate::store::{DocumentId, StoreError};

/// One independent source of candidate documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OriginSpec {
    /// Every markdown document under a vault subdirectory (whole vault when
    /// the path is empty)
    Subtree { path: String },

    /// Documents whose filename stem parses as a date under a chrono format
    /// string, e.g. `%Y-%m-%d` for daily notes
    DatePattern { pattern: String },

    /// Documents containing an inline `#tag` token
    Tagged { tag: String },

    /// Documents whose id matches a glob pattern, e.g. `projects/**/*.md`
    Glob { pattern: String },
}

impl std::fmt::Display for OriginSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subtree { path } => write!(f, "subtree:{}", if path.is_empty() { "." } else { path }),
            Self::DatePattern { pattern } => write!(f, "date-pattern:{}", pattern),
            Self::Tagged { tag } => write!(f, "tagged:#{}", tag),
            Self::Glob { pattern } => write!(f, "glob:{}", pattern),
        }
    }
}

/// Enumerate the documents one origin contributes, sorted ascending by id
pub(crate) fn enumerate(root: &Path, origin: &OriginSpec) -> Result<Vec<DocumentId>, StoreError> {
    let mut ids = match origin {
        OriginSpec::Subtree { path } => list_subtree(root, path)?,
        OriginSpec::DatePattern { pattern } => list_date_pattern(root, pattern)?,
        OriginSpec::Tagged { tag } => list_tagged(root, tag)?,
        OriginSpec::Glob { pattern } => list_glob(root, pattern)?,
    };
    ids.sort();
    debug!(origin = %origin, count = ids.len(), "origins::enumerate");
    Ok(ids)
}

/// Walk every markdown document under `base`, returning ids relative to
/// `root`. Hidden directories and files are skipped.
fn walk_markdown(root: &Path, base: &Path) -> Vec<DocumentId> {
    WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == MARKDOWN_EXTENSION)
                .unwrap_or(false)
        })
        .filter_map(|e| relative_id(root, e.path()))
        .collect()
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Convert an absolute path into a `/`-separated id relative to the vault
/// root. Non-UTF8 paths are skipped.
fn relative_id(root: &Path, path: &Path) -> Option<DocumentId> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.iter().map(|part| part.to_str()).collect();
    Some(parts?.join("/"))
}

fn list_subtree(root: &Path, path: &str) -> Result<Vec<DocumentId>, StoreError> {
    let base = if path.is_empty() { root.to_path_buf() } else { root.join(path) };
    if !base.is_dir() {
        return Err(StoreError::OriginUnavailable {
            origin: format!("subtree:{}", path),
            reason: "directory does not exist".to_string(),
        });
    }
    Ok(walk_markdown(root, &base))
}

fn list_date_pattern(root: &Path, pattern: &str) -> Result<Vec<DocumentId>, StoreError> {
    // Reject malformed strftime patterns up front; a bad pattern would
    // otherwise silently match nothing.
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(StoreError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "unrecognized strftime specifier".to_string(),
        });
    }

    Ok(walk_markdown(root, root)
        .into_iter()
        .filter(|id| stem_matches_date(id, pattern))
        .collect())
}

/// True if the trailing filename stem of `id` parses as a date under
/// `pattern`
pub(crate) fn stem_matches_date(id: &str, pattern: &str) -> bool {
    let name = id.rsplit('/').next().unwrap_or(id);
    let stem = name.strip_suffix(".md").unwrap_or(name);
    NaiveDate::parse_from_str(stem, pattern).is_ok()
}

fn list_tagged(root: &Path, tag: &str) -> Result<Vec<DocumentId>, StoreError> {
    // `#tag` followed by a word boundary, so `#todo` does not match `#todoist`
    let pattern = format!("#{}\\b", regex::escape(tag));
    let matcher = RegexMatcher::new(&pattern).map_err(|e| StoreError::InvalidPattern {
        pattern,
        reason: e.to_string(),
    })?;

    let mut searcher = SearcherBuilder::new()
        .binary_detection(BinaryDetection::quit(b'\x00'))
        .build();

    let mut ids = Vec::new();
    for id in walk_markdown(root, root) {
        let path = root.join(&id);
        let mut found = false;
        let result = searcher.search_path(
            &matcher,
            &path,
            UTF8(|_lnum, _line| {
                found = true;
                Ok(false) // first hit is enough
            }),
        );
        if let Err(e) = result {
            debug!(%id, error = %e, "list_tagged: skipping unsearchable document");
            continue;
        }
        if found {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn list_glob(root: &Path, pattern: &str) -> Result<Vec<DocumentId>, StoreError> {
    let glob = glob::Pattern::new(pattern).map_err(|e| StoreError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(walk_markdown(root, root)
        .into_iter()
        .filter(|id| glob.matches(id))
        .collect())
}
