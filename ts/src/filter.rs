//! Status filter compilation and structural task-line parsing
//!
//! A filter set is a closed-world map from status symbol to an included
//! flag: symbols absent from the map are excluded. Compilation produces a
//! cheap predicate the scanner consults per candidate line.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use tracing::debug;

/// Status symbol -> included flag. Closed world: absent symbols are
/// excluded.
pub type StatusFilterSet = BTreeMap<char, bool>;

/// Structural pattern for a task line: optional leading whitespace, a dash
/// list marker, a single-character bracket token, then whitespace and text.
pub const STATUS_LINE_PATTERN: &str = r"^\s*-\s+\[(.)\]\s(.*)$";

/// A line that matched the structural pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// The character inside the bracket token
    pub status: char,
    /// Text after the bracket token
    pub text: &'a str,
}

/// Capture-based parser for the structural pattern
pub struct LineParser {
    re: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            re: Regex::new(STATUS_LINE_PATTERN).expect("structural pattern is valid"),
        }
    }

    /// Parse one line (without its terminator). Returns `None` for lines
    /// that are not structurally task lines.
    pub fn parse<'a>(&self, line: &'a str) -> Option<ParsedLine<'a>> {
        let caps = self.re.captures(line)?;
        let status = caps.get(1)?.as_str().chars().next()?;
        let text = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        Some(ParsedLine { status, text })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Inclusion predicate compiled from a [`StatusFilterSet`]
#[derive(Debug, Clone, Default)]
pub struct StatusPredicate {
    included: HashSet<char>,
}

impl StatusPredicate {
    pub fn matches(&self, symbol: char) -> bool {
        self.included.contains(&symbol)
    }

    /// True when the predicate can never match (empty effective set)
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }
}

/// Compile a filter set into an inclusion predicate.
///
/// Symbols mapped to `false` or absent are excluded. Including `'.'` also
/// includes `' '` (the rule is one-directional: `' '` alone does not pull
/// in `'.'`). An empty effective set compiles to a predicate matching
/// nothing.
pub fn compile_filter(filters: &StatusFilterSet) -> StatusPredicate {
    let mut included: HashSet<char> = filters
        .iter()
        .filter(|&(_, &on)| on)
        .map(|(&symbol, _)| symbol)
        .collect();
    if included.contains(&'.') {
        included.insert(' ');
    }
    debug!(included = ?included, "compile_filter");
    StatusPredicate { included }
}
