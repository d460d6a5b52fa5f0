//! Task line records
//!
//! `TaskLine` is produced by the scanner and is immutable once produced.
//! `RankedTask` is a fresh annotated snapshot returned by the ranker -
//! callers thread the latest snapshot explicitly instead of sharing a
//! mutable task list between services.

use serde::{Deserialize, Serialize};
use vaultstore::DocumentId;

/// A single line recognized as a status-tagged task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLine {
    /// Document the line was read from
    pub document_id: DocumentId,

    /// 1-based line number within the document
    pub line_number: u64,

    /// The full line, trimmed
    pub raw_line: String,

    /// The single character inside the bracket token
    pub status: char,

    /// Text after the bracket token
    pub text: String,
}

impl TaskLine {
    /// Stable identity of the line within its document
    pub fn location(&self) -> String {
        format!("{}:{}", self.document_id, self.line_number)
    }
}

/// A task annotated with its tier rank and top-task flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTask {
    #[serde(flatten)]
    pub task: TaskLine,

    /// Tier priority when the status matched a tier (lower = higher
    /// precedence)
    pub rank: Option<u32>,

    /// Whether this task is the currently selected top task
    pub is_top: bool,
}

impl RankedTask {
    /// An unannotated snapshot of a task line
    pub fn unranked(task: TaskLine) -> Self {
        Self {
            task,
            rank: None,
            is_top: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskLine {
        TaskLine {
            document_id: "daily/2026-08-06.md".to_string(),
            line_number: 3,
            raw_line: "- [!] call the plumber".to_string(),
            status: '!',
            text: "call the plumber".to_string(),
        }
    }

    #[test]
    fn test_location() {
        assert_eq!(sample().location(), "daily/2026-08-06.md:3");
    }

    #[test]
    fn test_ranked_task_serde_flattens_task() {
        let ranked = RankedTask {
            task: sample(),
            rank: Some(2),
            is_top: true,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["status"], "!");
        assert_eq!(json["rank"], 2);
        assert_eq!(json["is_top"], true);

        let back: RankedTask = serde_json::from_value(json).unwrap();
        assert_eq!(back, ranked);
    }

    #[test]
    fn test_unranked_clears_annotations() {
        let ranked = RankedTask::unranked(sample());
        assert_eq!(ranked.rank, None);
        assert!(!ranked.is_top);
    }
}
