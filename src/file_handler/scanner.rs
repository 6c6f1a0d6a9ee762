//! Line boundary detection on top of a mapped file
//!
//! `LineScanner` answers the two questions navigation needs: where is the next line
//! terminator after an offset, and where is the previous one before it. Forward search
//! is an unbounded SIMD `memchr`; backward search is confined to a window chosen by a
//! [`BackwardSearch`] strategy so that stepping up one line never scans a whole 40GB file.

use crate::file_handler::mmap::MappedFile;
use bstr::ByteSlice;
use std::borrow::Cow;

/// The only byte recognized as a line terminator.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Page size assumed when none is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 4096;

/// How `prev_newline` bounds its backward search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum BackwardSearch {
    /// Window `[max(0, size % page - 2 * page), from)`, anchored near the end of the file.
    ///
    /// `size % page` is always below one page, so the lower bound clamps to byte 0 and
    /// every search may scan back to the start of the file.
    PageAnchored,
    /// Window of two pages ending at `from`, doubled leftwards until a terminator is
    /// found or byte 0 is covered. Cost is proportional to the line length.
    #[default]
    Expanding,
}

impl BackwardSearch {
    /// Parse the command-line spelling of a strategy
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "page-anchored" => Some(Self::PageAnchored),
            "expanding" => Some(Self::Expanding),
            _ => None,
        }
    }
}

/// A line as a byte range `[start, end)` with its terminator already trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: u64,
    pub end: u64,
}

impl Line {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Finds line boundaries in a [`MappedFile`]
#[derive(Debug)]
pub struct LineScanner {
    file: MappedFile,
    strategy: BackwardSearch,
    page_size: u64,
}

impl LineScanner {
    pub fn new(file: MappedFile, strategy: BackwardSearch, page_size: u64) -> Self {
        Self {
            file,
            strategy,
            page_size: page_size.max(1),
        }
    }

    pub fn file(&self) -> &MappedFile {
        &self.file
    }

    pub fn size(&self) -> u64 {
        self.file.size()
    }

    pub fn strategy(&self) -> BackwardSearch {
        self.strategy
    }

    /// True when `offset` addresses the first byte of a line
    pub fn is_line_start(&self, offset: u64) -> bool {
        offset == 0 || matches!(self.file.byte_at(offset - 1), Ok(LINE_TERMINATOR))
    }

    /// First terminator at or after `from`
    pub fn next_newline(&self, from: u64) -> Option<u64> {
        self.file.find_forward(LINE_TERMINATOR, from)
    }

    /// Nearest terminator strictly before `from`, within the strategy's window
    ///
    /// `None` means the search reached the start of its window, which callers treat
    /// as the start of the file.
    pub fn prev_newline(&self, from: u64) -> Option<u64> {
        let hi = from.min(self.file.size());
        match self.strategy {
            BackwardSearch::PageAnchored => {
                let anchor = self.file.size() % self.page_size;
                let lo = anchor.saturating_sub(2 * self.page_size);
                self.file.find_backward(LINE_TERMINATOR, lo, hi)
            }
            BackwardSearch::Expanding => {
                let mut hi = hi;
                let mut window = 2 * self.page_size;
                loop {
                    let lo = hi.saturating_sub(window);
                    if let Some(pos) = self.file.find_backward(LINE_TERMINATOR, lo, hi) {
                        return Some(pos);
                    }
                    if lo == 0 {
                        return None;
                    }
                    hi = lo;
                    window = window.saturating_mul(2);
                }
            }
        }
    }

    /// Read up to `count` lines forward from `from`
    ///
    /// A terminator at the very end of the file does not produce a trailing empty line.
    pub fn read_lines(&self, from: u64, count: usize) -> Vec<Line> {
        let size = self.file.size();
        let mut lines = Vec::with_capacity(count.min(1024));
        let mut pos = from;

        while lines.len() < count && pos < size {
            match self.next_newline(pos) {
                Some(newline) => {
                    lines.push(Line {
                        start: pos,
                        end: newline,
                    });
                    pos = newline + 1;
                }
                None => {
                    lines.push(Line {
                        start: pos,
                        end: size,
                    });
                    break;
                }
            }
        }

        lines
    }

    /// The contiguous bytes covering `lines`, joined by their single terminators
    ///
    /// `lines` must be consecutive as returned by [`read_lines`](Self::read_lines).
    pub fn block(&self, lines: &[Line]) -> &[u8] {
        match (lines.first(), lines.last()) {
            (Some(first), Some(last)) => self
                .file
                .read_range(first.start, (last.end - first.start) as usize),
            _ => &[],
        }
    }

    /// Raw bytes of a single line
    pub fn line_bytes(&self, line: &Line) -> &[u8] {
        self.file.read_range(line.start, line.len() as usize)
    }

    /// Line content decoded as UTF-8, replacing invalid sequences
    pub fn line_text(&self, line: &Line) -> Cow<'_, str> {
        self.line_bytes(line).to_str_lossy()
    }
}
