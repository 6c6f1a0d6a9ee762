//! Pluggable styling strategies for the visible block
//!
//! The viewer holds a `Box<dyn LineRenderer>` and calls it every time the window is
//! re-materialized. [`PlainRenderer`] emits unstyled text; [`RegexRenderer`] owns a
//! [`HighlightState`] and overlays active or stale matches.

use crate::highlight::engine::{highlight_block, SpanStyle, StyledLine};
use crate::highlight::pattern::{HighlightState, SearchPattern};

/// Produces styled tokens for a block of visible text
pub trait LineRenderer: Send {
    /// Style `block`, returning one token list per line
    fn render(&mut self, block: &[u8]) -> Vec<StyledLine>;

    /// Replace the pattern in use; renderers without patterns ignore this
    fn set_pattern(&mut self, _pattern: Option<SearchPattern>) {}

    /// The pattern in use, if this renderer supports one
    fn active_pattern(&self) -> Option<&SearchPattern> {
        None
    }
}

/// Renders text with no styling
#[derive(Debug, Default)]
pub struct PlainRenderer;

impl LineRenderer for PlainRenderer {
    fn render(&mut self, block: &[u8]) -> Vec<StyledLine> {
        highlight_block(block, &[], SpanStyle::None)
    }
}

/// Highlights regex matches, falling back to the last pattern that matched
#[derive(Debug, Default)]
pub struct RegexRenderer {
    state: HighlightState,
}

impl RegexRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }
}

impl LineRenderer for RegexRenderer {
    fn render(&mut self, block: &[u8]) -> Vec<StyledLine> {
        let mut matches = self
            .state
            .active_pattern
            .as_ref()
            .map(|pattern| pattern.find_all(block))
            .unwrap_or_default();

        let style = if !matches.is_empty() {
            self.state.last_good_pattern = self.state.active_pattern.clone();
            SpanStyle::ActiveMatch
        } else if let Some(last_good) = &self.state.last_good_pattern {
            matches = last_good.find_all(block);
            SpanStyle::StaleMatch
        } else {
            SpanStyle::None
        };

        highlight_block(block, &matches, style)
    }

    fn set_pattern(&mut self, pattern: Option<SearchPattern>) {
        self.state.active_pattern = pattern;
    }

    fn active_pattern(&self) -> Option<&SearchPattern> {
        self.state.active_pattern.as_ref()
    }
}
