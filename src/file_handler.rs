//! File access built on a read-only memory mapping.
//!
//! This module provides the byte-level primitives the viewport is built on: a
//! [`MappedFile`] that borrows bytes straight from the mapping, and a [`LineScanner`]
//! that locates line terminators forward and (within a bounded window) backward.

pub mod mmap;
pub mod scanner;
pub mod validation;

pub use mmap::MappedFile;
pub use scanner::{BackwardSearch, Line, LineScanner, DEFAULT_PAGE_SIZE, LINE_TERMINATOR};
pub use validation::validate_file_path;
