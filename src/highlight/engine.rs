//! Sweep-line merge of match ranges and line breaks into styled spans
//!
//! Matches are computed over the whole visible block, so one match may cover the end
//! of a line and the start of the next. The sweep turns match boundaries and line
//! terminators into a sorted event list and walks it once, cutting the block into
//! per-line token lists.

use bstr::ByteSlice;
use std::collections::BTreeMap;

use crate::file_handler::LINE_TERMINATOR;

/// Style tag of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanStyle {
    #[default]
    None,
    /// Matched by the pattern currently in use
    ActiveMatch,
    /// Matched only by the last pattern that matched anything
    StaleMatch,
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub style: SpanStyle,
    pub text: String,
}

impl StyledSpan {
    pub fn new(style: SpanStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanStyle::None, text)
    }
}

/// Left-to-right spans of one visible line
pub type StyledLine = Vec<StyledSpan>;

/// The rendering of a line with no content
pub fn empty_line() -> StyledLine {
    vec![StyledSpan::plain("")]
}

/// Events gathered at one block offset
#[derive(Debug, Default)]
struct OffsetEvents {
    match_starts: usize,
    match_ends: usize,
    line_break: bool,
    end: bool,
}

impl OffsetEvents {
    /// A start and an end at the same offset leave the styling unchanged
    fn cancel_pairs(&mut self) {
        let paired = self.match_starts.min(self.match_ends);
        self.match_starts -= paired;
        self.match_ends -= paired;
    }

    fn is_empty(&self) -> bool {
        self.match_starts == 0 && self.match_ends == 0 && !self.line_break && !self.end
    }

    fn closes_line(&self) -> bool {
        self.line_break || self.end
    }
}

/// Split `block` into per-line spans, styling the `matches` ranges with `style`
///
/// `matches` are `[start, end)` byte ranges into `block`, as produced by a
/// left-to-right non-overlapping search. The result has one entry per line of the
/// block; an empty line is a single empty plain span. Invalid UTF-8 is replaced,
/// never rejected.
pub fn highlight_block(
    block: &[u8],
    matches: &[(usize, usize)],
    style: SpanStyle,
) -> Vec<StyledLine> {
    let mut events: BTreeMap<usize, OffsetEvents> = BTreeMap::new();

    for &(start, end) in matches {
        events.entry(start).or_default().match_starts += 1;
        events.entry(end).or_default().match_ends += 1;
    }
    for pos in memchr::memchr_iter(LINE_TERMINATOR, block) {
        events.entry(pos).or_default().line_break = true;
    }
    events.entry(block.len()).or_default().end = true;

    let mut lines = Vec::new();
    let mut current: StyledLine = Vec::new();
    let mut depth = 0usize;
    let mut o_curr = 0usize;

    for (&o_next, offset_events) in events.iter_mut() {
        offset_events.cancel_pairs();
        if offset_events.is_empty() {
            continue;
        }

        if o_next > o_curr {
            let span_style = if depth > 0 { style } else { SpanStyle::None };
            let text = block[o_curr..o_next].to_str_lossy().into_owned();
            current.push(StyledSpan::new(span_style, text));
        }
        o_curr = o_next;

        depth += offset_events.match_starts;
        depth = depth.saturating_sub(offset_events.match_ends);

        if offset_events.closes_line() {
            lines.push(finish_line(std::mem::take(&mut current)));
            o_curr = o_next + 1;
        }
    }

    lines
}

fn finish_line(spans: StyledLine) -> StyledLine {
    if spans.is_empty() {
        empty_line()
    } else {
        spans
    }
}
