//! Per-document match-list extraction
//!
//! A document's "match list" is every line, in line order, that matches the
//! structural task pattern and whose status symbol satisfies the active
//! predicate. A grep pass locates structural candidates; the capture-based
//! parser is authoritative for the status symbol and text.

use grep_regex::RegexMatcher;
use grep_searcher::sinks::UTF8;
use grep_searcher::{BinaryDetection, SearcherBuilder};
use tracing::debug;

use crate::domain::TaskLine;
use crate::filter::{LineParser, STATUS_LINE_PATTERN, StatusPredicate};

pub struct MatchExtractor {
    matcher: RegexMatcher,
    parser: LineParser,
}

impl MatchExtractor {
    pub fn new() -> Self {
        Self {
            matcher: RegexMatcher::new(STATUS_LINE_PATTERN).expect("structural pattern is valid"),
            parser: LineParser::new(),
        }
    }

    /// Extract a document's ordered match list
    pub fn matches(&self, document_id: &str, text: &str, predicate: &StatusPredicate) -> Vec<TaskLine> {
        let mut out = Vec::new();
        if predicate.is_empty() {
            return out;
        }

        let mut searcher = SearcherBuilder::new()
            .binary_detection(BinaryDetection::quit(b'\x00'))
            .build();

        let result = searcher.search_slice(
            &self.matcher,
            text.as_bytes(),
            UTF8(|line_number, line| {
                let line = line.trim_end_matches(['\r', '\n']);
                if let Some(parsed) = self.parser.parse(line) {
                    if predicate.matches(parsed.status) {
                        out.push(TaskLine {
                            document_id: document_id.to_string(),
                            line_number,
                            raw_line: line.trim().to_string(),
                            status: parsed.status,
                            text: parsed.text.to_string(),
                        });
                    }
                }
                Ok(true)
            }),
        );

        if let Err(e) = result {
            debug!(%document_id, error = %e, "match extraction stopped early");
        }

        out
    }
}

impl Default for MatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{StatusFilterSet, compile_filter};

    fn predicate(pairs: &[(char, bool)]) -> StatusPredicate {
        compile_filter(&pairs.iter().copied().collect::<StatusFilterSet>())
    }

    #[test]
    fn test_matches_in_line_order_with_line_numbers() {
        let extractor = MatchExtractor::new();
        let text = "# heading\n- [ ] first\nprose\n- [x] second\n- [ ] third\n";
        let tasks = extractor.matches("a.md", text, &predicate(&[(' ', true), ('x', true)]));

        let summary: Vec<(u64, char)> = tasks.iter().map(|t| (t.line_number, t.status)).collect();
        assert_eq!(summary, vec![(2, ' '), (4, 'x'), (5, ' ')]);
        assert_eq!(tasks[0].text, "first");
        assert_eq!(tasks[0].raw_line, "- [ ] first");
    }

    #[test]
    fn test_predicate_excludes_statuses() {
        let extractor = MatchExtractor::new();
        let text = "- [ ] keep\n- [x] drop\n- [?] drop too\n";
        let tasks = extractor.matches("a.md", text, &predicate(&[(' ', true)]));

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, ' ');
    }

    #[test]
    fn test_indented_tasks_are_trimmed() {
        let extractor = MatchExtractor::new();
        let text = "  - [/] indented\n";
        let tasks = extractor.matches("a.md", text, &predicate(&[('/', true)]));

        assert_eq!(tasks[0].raw_line, "- [/] indented");
        assert_eq!(tasks[0].line_number, 1);
    }

    #[test]
    fn test_crlf_lines_parse() {
        let extractor = MatchExtractor::new();
        let text = "- [ ] windows line\r\n- [ ] second\r\n";
        let tasks = extractor.matches("a.md", text, &predicate(&[(' ', true)]));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "windows line");
    }

    #[test]
    fn test_empty_predicate_short_circuits() {
        let extractor = MatchExtractor::new();
        let tasks = extractor.matches("a.md", "- [ ] never\n", &predicate(&[]));
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_malformed_lines_excluded() {
        let extractor = MatchExtractor::new();
        let text = "- [] empty token\n- [ab] wide token\n-- [ ] double dash\n";
        let tasks = extractor.matches("a.md", text, &predicate(&[(' ', true), ('a', true)]));
        assert!(tasks.is_empty());
    }
}
