//! Compiled search patterns and the per-viewer highlight memory
//!
//! Patterns are compiled with `grep-regex` and matched through the `grep_matcher::Matcher`
//! trait, so they run over raw bytes of the mapping without any UTF-8 validation.

use crate::error::{HugeviewError, Result};
use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};

/// Options controlling how a pattern string is compiled
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize), serde(default))]
pub struct SearchOptions {
    /// Ignore case for the whole pattern
    pub case_insensitive: bool,
    /// Ignore case unless the pattern contains an uppercase character
    pub smart_case: bool,
    /// Let `.` match the line terminator. Off by default; `(?s)` turns it on for a
    /// single pattern.
    pub dot_matches_new_line: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            smart_case: false,
            dot_matches_new_line: false,
        }
    }
}

/// A compiled regular expression over bytes together with its source text
#[derive(Debug, Clone)]
pub struct SearchPattern {
    source: String,
    matcher: RegexMatcher,
}

impl SearchPattern {
    /// Compile `pattern`
    ///
    /// # Errors
    /// * `PatternError` when the expression is malformed
    pub fn new(pattern: &str, options: &SearchOptions) -> Result<Self> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(options.case_insensitive)
            .case_smart(options.smart_case)
            .dot_matches_new_line(options.dot_matches_new_line)
            .multi_line(true)
            .build(pattern)
            .map_err(|e| HugeviewError::pattern(pattern, e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            matcher,
        })
    }

    /// The pattern as typed
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// All non-overlapping matches in `haystack`, as `[start, end)` byte ranges
    pub fn find_all(&self, haystack: &[u8]) -> Vec<(usize, usize)> {
        let mut matches = Vec::new();
        // RegexMatcher's error type is uninhabited
        let _ = self.matcher.find_iter(haystack, |m| {
            matches.push((m.start(), m.end()));
            true
        });
        matches
    }

    /// First match starting at or after `at`
    pub fn find_at(&self, haystack: &[u8], at: usize) -> Option<(usize, usize)> {
        if at > haystack.len() {
            return None;
        }
        self.matcher
            .find_at(haystack, at)
            .ok()
            .flatten()
            .map(|m| (m.start(), m.end()))
    }
}

/// Highlight memory owned by one viewer
///
/// `last_good_pattern` is the most recent pattern that matched anything in a rendered
/// window. It survives windows and patterns that match nothing, which lets old hits
/// keep a distinct "stale" style until a new pattern produces a fresh match.
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    pub active_pattern: Option<SearchPattern>,
    pub last_good_pattern: Option<SearchPattern>,
}
