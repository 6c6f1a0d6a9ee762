//! # hugeview - Terminal Viewer for Huge Files
//!
//! Shows a window of lines from an arbitrarily large text file without reading it
//! into memory, and highlights regex matches inside that window.
//!
//! ## Features
//!
//! - **Memory-mapped access**: opening a 40GB file costs nothing until a region is shown
//! - **Line-aligned viewport**: the window always starts at a line start; scrolling moves
//!   between line starts with SIMD newline search
//! - **Cross-line highlighting**: matches are found over the whole visible block, so a
//!   pattern may span visible lines
//! - **Stale matches**: hits of the last pattern that matched stay visible, in a separate
//!   style, while a new pattern matches nothing
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`file_handler`] - Memory mapping and line boundary search
//! - [`viewport`] - Viewport state and the navigation engine ([`Viewer`])
//! - [`highlight`] - Patterns, the sweep-line highlight merge and line renderers
//! - [`config`] - Viewer configuration
//! - [`input`], [`ui`], [`app`] - The terminal host

pub mod error;
pub mod file_handler;
pub mod highlight;
pub mod viewport;

pub mod config;

pub mod app;
pub mod input;
pub mod ui;

pub use error::{HugeviewError, Result};

pub use app::Application;
pub use config::{ThemeName, ViewerConfig};
pub use file_handler::BackwardSearch;
pub use highlight::{
    LineRenderer, PlainRenderer, RegexRenderer, SearchOptions, SearchPattern, SpanStyle,
    StyledLine, StyledSpan,
};
pub use viewport::Viewer;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
