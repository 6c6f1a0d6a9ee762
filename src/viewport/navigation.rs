//! Line-aligned navigation over a mapped file
//!
//! [`Viewer`] owns the mapping, the viewport position and the renderer. Every
//! operation moves the offset between line starts and then re-materializes the
//! visible lines, so callers read the result through [`Viewer::visible_lines`]
//! without ever touching the file themselves.

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::file_handler::{Line, LineScanner, MappedFile};
use crate::highlight::{
    empty_line, LineRenderer, RegexRenderer, SearchOptions, SearchPattern, StyledLine,
};
use crate::viewport::state::ViewportState;
use std::fs::File;
use std::path::Path;

/// A bounded, scrollable window of lines over a huge file
///
/// The window starts with height 0 and shows nothing until the host calls
/// [`set_height`](Self::set_height).
pub struct Viewer {
    scanner: LineScanner,
    state: ViewportState,
    renderer: Box<dyn LineRenderer>,
    search_options: SearchOptions,

    /// Lines currently in the window, unpadded
    lines: Vec<Line>,

    /// Styled form of `lines`, padded to exactly `height` entries
    rendered: Vec<StyledLine>,
}

impl Viewer {
    /// Open and map the file at `path`
    ///
    /// # Errors
    /// * The file is missing, empty, not a regular file, or cannot be mapped
    pub fn open(path: impl AsRef<Path>, config: &ViewerConfig) -> Result<Self> {
        let file = MappedFile::open(path)?;
        Ok(Self::from_mapped(file, config))
    }

    /// Map an already opened file
    pub fn from_file(file: File, config: &ViewerConfig) -> Result<Self> {
        let mapped = MappedFile::from_file(&file)?;
        Ok(Self::from_mapped(mapped, config))
    }

    fn from_mapped(file: MappedFile, config: &ViewerConfig) -> Self {
        log::debug!(
            "opening viewer: size={} strategy={:?} page_size={}",
            file.size(),
            config.backward_search,
            config.page_size
        );
        let mut viewer = Self {
            scanner: LineScanner::new(file, config.backward_search, config.page_size),
            state: ViewportState::new(),
            renderer: Box::new(RegexRenderer::new()),
            search_options: config.search.clone(),
            lines: Vec::new(),
            rendered: Vec::new(),
        };
        viewer.materialize();
        viewer
    }

    /// Replace the renderer, dropping any pattern held by the previous one
    pub fn with_renderer(mut self, renderer: Box<dyn LineRenderer>) -> Self {
        self.renderer = renderer;
        self.materialize();
        self
    }

    /// Release the mapping
    pub fn close(self) {
        log::debug!("closing viewer at offset {}", self.state.offset);
    }

    pub fn height(&self) -> usize {
        self.state.height
    }

    pub fn offset(&self) -> u64 {
        self.state.offset
    }

    pub fn offset_max(&self) -> u64 {
        self.state.offset_max
    }

    pub fn file_size(&self) -> u64 {
        self.scanner.size()
    }

    /// Path of the viewed file, when it was opened by path
    pub fn path(&self) -> Option<&Path> {
        self.scanner.file().path()
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Change the number of visible lines
    ///
    /// Recomputes `offset_max` by stepping back `height` lines from the end of the
    /// file, then pulls the offset back under it if needed.
    pub fn set_height(&mut self, height: usize) {
        if height == self.state.height {
            return;
        }

        self.state.offset_max = self.compute_offset_max(height);
        self.state.height = height;
        self.state.offset = self.state.clamp(self.state.offset);
        log::debug!(
            "height={} offset_max={} offset={}",
            height,
            self.state.offset_max,
            self.state.offset
        );
        self.materialize();
    }

    fn compute_offset_max(&self, height: usize) -> u64 {
        let mut cursor = self.scanner.size().saturating_sub(1);
        let mut offset_max = 0;

        for _ in 0..height {
            match self.scanner.prev_newline(cursor) {
                Some(newline) => {
                    offset_max = newline + 1;
                    cursor = newline;
                }
                None => {
                    offset_max = 0;
                    break;
                }
            }
        }

        offset_max
    }

    /// Move the window to `offset`, clamped to `[0, offset_max]`
    ///
    /// # Panics
    /// When the clamped offset is not the first byte of a line.
    pub fn set_offset(&mut self, offset: u64) {
        let offset = self.state.clamp(offset);
        assert!(
            self.scanner.is_line_start(offset),
            "offset {offset} is not at the start of a line"
        );
        self.state.offset = offset;
        self.materialize();
    }

    /// Re-read the window and render it
    fn materialize(&mut self) {
        let height = self.state.height;
        let lines = self.scanner.read_lines(self.state.offset, height);

        // Keep the window full when scrolled past the last complete page
        if lines.len() < height && self.state.offset < self.state.offset_max {
            self.go_up(height - lines.len());
            return;
        }

        let block = self.scanner.block(&lines);
        let mut rendered = self.renderer.render(block);
        rendered.truncate(height);
        rendered.resize_with(height, empty_line);

        self.lines = lines;
        self.rendered = rendered;
    }

    pub fn go_top(&mut self) {
        self.set_offset(0);
    }

    pub fn go_bottom(&mut self) {
        self.set_offset(self.state.offset_max);
    }

    /// Scroll up `lines` lines, stopping at the top of the file
    pub fn go_up(&mut self, lines: usize) {
        let mut offset = self.state.offset;

        for _ in 0..lines {
            if offset == 0 {
                break;
            }
            offset = match self.scanner.prev_newline(offset - 1) {
                Some(newline) => newline + 1,
                None => 0,
            };
        }

        self.state.offset = self.state.clamp(offset);
        self.materialize();
    }

    /// Scroll down `lines` lines, stopping at `offset_max`
    pub fn go_down(&mut self, lines: usize) {
        self.state.offset = self.offset_after_down(lines);
        self.materialize();
    }

    /// The offset `go_down(lines)` would reach, without moving
    fn offset_after_down(&self, lines: usize) -> u64 {
        let mut offset = self.state.offset;

        for _ in 0..lines {
            if offset >= self.state.offset_max {
                break;
            }
            match self.scanner.next_newline(offset) {
                Some(newline) => offset = newline + 1,
                None => break,
            }
        }

        offset
    }

    pub fn go_pageup(&mut self) {
        self.go_up(self.state.height);
    }

    pub fn go_pagedown(&mut self) {
        self.go_down(self.state.height);
    }

    /// Show the line containing byte `target`
    ///
    /// Targets past the end of the file are clamped to the file size. A target in
    /// the middle of a line snaps back to that line's start; when no terminator is
    /// found before it the window does not move.
    pub fn go_to_byte_offset(&mut self, target: u64) {
        let target = target.min(self.scanner.size());

        if self.scanner.is_line_start(target) {
            self.set_offset(target);
            return;
        }

        match self.scanner.prev_newline(target) {
            Some(newline) => self.set_offset(newline + 1),
            None => log::debug!("no line start before {}, staying put", target),
        }
    }

    /// Styled window contents, exactly `height` entries
    pub fn visible_lines(&self) -> &[StyledLine] {
        &self.rendered
    }

    /// Text of the lines actually present in the window, without padding
    pub fn line_texts(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| self.scanner.line_text(line).into_owned())
            .collect()
    }

    /// The pattern currently used for highlighting and search
    pub fn pattern(&self) -> Option<&SearchPattern> {
        self.renderer.active_pattern()
    }

    /// Replace the highlight pattern and re-render
    ///
    /// The last pattern that matched is kept, so its hits stay visible in the
    /// stale style while the new pattern matches nothing.
    pub fn set_pattern(&mut self, pattern: Option<SearchPattern>) {
        self.renderer.set_pattern(pattern);
        self.materialize();
    }

    /// Compile `pattern` with the configured options and make it active
    ///
    /// # Errors
    /// * `PatternError` when the expression is malformed; nothing changes
    pub fn set_pattern_str(&mut self, pattern: Option<&str>) -> Result<()> {
        let compiled = pattern
            .map(|source| SearchPattern::new(source, &self.search_options))
            .transpose()?;
        self.set_pattern(compiled);
        Ok(())
    }

    /// Jump to the next match of the active pattern beyond the current page
    ///
    /// The search starts where a page down would land and covers the rest of the
    /// file. Returns `false`, leaving the window untouched, when there is no active
    /// pattern or nothing matches.
    pub fn search_next(&mut self) -> bool {
        let Some(pattern) = self.renderer.active_pattern() else {
            return false;
        };

        let from = self.offset_after_down(self.state.height);
        let haystack = self.scanner.file().as_bytes();
        let found = pattern.find_at(haystack, from as usize);

        match found {
            Some((start, end)) => {
                log::debug!("match at {}..{} searching from {}", start, end, from);
                self.go_to_byte_offset(end as u64);
                self.go_down(1);
                true
            }
            None => {
                log::debug!("no match after {}", from);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HugeviewError;
    use crate::highlight::{PlainRenderer, SpanStyle, StyledSpan};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary test file with known content
    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test data");
        file.flush().expect("Failed to flush test data");
        file
    }

    fn viewer_for(content: &[u8], height: usize) -> (NamedTempFile, Viewer) {
        let file = create_test_file(content);
        let mut viewer = Viewer::open(file.path(), &ViewerConfig::default()).unwrap();
        viewer.set_height(height);
        (file, viewer)
    }

    fn numbers(count: usize) -> Vec<u8> {
        (0..count)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("\n")
            .into_bytes()
    }

    #[test]
    fn test_initial_height_is_zero() {
        let file = create_test_file(b"a\nb\n");
        let viewer = Viewer::open(file.path(), &ViewerConfig::default()).unwrap();
        assert_eq!(viewer.height(), 0);
        assert_eq!(viewer.offset_max(), 0);
        assert!(viewer.visible_lines().is_empty());
        assert!(viewer.line_texts().is_empty());
    }

    #[test]
    fn test_offset_max_for_height() {
        let (_file, mut viewer) = viewer_for(&numbers(12), 3);
        // "9" starts after "0\n" .. "8\n"
        assert_eq!(viewer.offset_max(), 18);

        viewer.set_height(20);
        assert_eq!(viewer.offset_max(), 0);

        viewer.set_height(0);
        assert_eq!(viewer.offset_max(), 0);
        assert!(viewer.visible_lines().is_empty());
    }

    #[test]
    fn test_growing_height_clamps_offset() {
        let (_file, mut viewer) = viewer_for(&numbers(12), 3);
        viewer.go_bottom();
        assert_eq!(viewer.offset(), 18);

        viewer.set_height(6);
        assert!(viewer.offset() <= viewer.offset_max());
        assert_eq!(viewer.line_texts(), vec!["6", "7", "8", "9", "10", "11"]);
    }

    #[test]
    fn test_visible_lines_are_padded() {
        let (_file, viewer) = viewer_for(b"only\n", 3);
        assert_eq!(viewer.line_texts(), vec!["only"]);
        assert_eq!(
            viewer.visible_lines(),
            &[vec![StyledSpan::plain("only")], empty_line(), empty_line()]
        );
    }

    #[test]
    fn test_set_offset_clamps() {
        let (_file, mut viewer) = viewer_for(&numbers(12), 3);
        viewer.set_offset(u64::MAX);
        assert_eq!(viewer.offset(), viewer.offset_max());
        assert_eq!(viewer.line_texts(), vec!["9", "10", "11"]);
    }

    #[test]
    #[should_panic(expected = "not at the start of a line")]
    fn test_set_offset_rejects_mid_line() {
        let (_file, mut viewer) = viewer_for(b"abc\ndef\nghi\njkl\n", 2);
        viewer.set_offset(1);
    }

    #[test]
    fn test_go_to_byte_offset_snaps_to_line_start() {
        let (_file, mut viewer) = viewer_for(&numbers(12), 3);
        // Terminator of line "2"
        viewer.go_to_byte_offset(5);
        assert_eq!(viewer.line_texts(), vec!["2", "3", "4"]);

        viewer.go_to_byte_offset(4);
        assert_eq!(viewer.line_texts(), vec!["2", "3", "4"]);

        viewer.go_to_byte_offset(u64::MAX);
        assert_eq!(viewer.line_texts(), vec!["9", "10", "11"]);
    }

    #[test]
    fn test_go_to_byte_offset_in_first_line_stays() {
        let (_file, mut viewer) = viewer_for(b"abcdef\nxyz\n1\n2\n", 2);
        viewer.go_down(1);
        let before = viewer.offset();
        viewer.go_to_byte_offset(3);
        assert_eq!(viewer.offset(), before);
    }

    #[test]
    fn test_set_pattern_str_rejects_bad_pattern() {
        let (_file, mut viewer) = viewer_for(b"abc\ndef\n", 2);
        viewer.set_pattern_str(Some("b")).unwrap();

        let result = viewer.set_pattern_str(Some("("));
        assert!(matches!(result, Err(HugeviewError::PatternError { .. })));
        assert_eq!(viewer.pattern().map(|p| p.as_str()), Some("b"));
        assert_eq!(viewer.visible_lines()[0][1].style, SpanStyle::ActiveMatch);
    }

    #[test]
    fn test_search_next_moves_past_current_page() {
        let mut content = numbers(50);
        content.extend_from_slice(b"\nneedle\ntail\nmore\nend\n");
        let (_file, mut viewer) = viewer_for(&content, 3);

        viewer.set_pattern_str(Some("needle")).unwrap();
        assert!(viewer.search_next());
        assert_eq!(viewer.line_texts(), vec!["tail", "more", "end"]);
    }

    #[test]
    fn test_search_next_without_match_keeps_window() {
        let (_file, mut viewer) = viewer_for(&numbers(30), 3);
        assert!(!viewer.search_next());

        viewer.set_pattern_str(Some("zzz")).unwrap();
        viewer.go_down(2);
        let before = viewer.offset();
        assert!(!viewer.search_next());
        assert_eq!(viewer.offset(), before);
    }

    #[test]
    fn test_plain_renderer_has_no_pattern() {
        let file = create_test_file(b"abc\n");
        let mut viewer = Viewer::open(file.path(), &ViewerConfig::default())
            .unwrap()
            .with_renderer(Box::new(PlainRenderer));
        viewer.set_height(1);
        viewer.set_pattern_str(Some("b")).unwrap();

        assert!(viewer.pattern().is_none());
        assert_eq!(viewer.visible_lines(), &[vec![StyledSpan::plain("abc")]]);
        assert!(!viewer.search_next());
    }

    #[test]
    fn test_from_file_handle() {
        let file = create_test_file(b"x\ny\n");
        let handle = File::open(file.path()).unwrap();
        let mut viewer = Viewer::from_file(handle, &ViewerConfig::default()).unwrap();
        viewer.set_height(5);

        assert_eq!(viewer.path(), None);
        assert_eq!(viewer.file_size(), 4);
        assert_eq!(viewer.line_texts(), vec!["x", "y"]);
        viewer.close();
    }
}
