//! Regex highlighting of the visible window.
//!
//! - [`pattern`] - compiled byte patterns and the per-viewer highlight memory
//! - [`engine`] - the sweep-line merge producing styled spans
//! - [`renderer`] - the `LineRenderer` strategies the viewer plugs in

pub mod engine;
pub mod pattern;
pub mod renderer;

pub use engine::{empty_line, highlight_block, SpanStyle, StyledLine, StyledSpan};
pub use pattern::{HighlightState, SearchOptions, SearchPattern};
pub use renderer::{LineRenderer, PlainRenderer, RegexRenderer};
