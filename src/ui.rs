//! Terminal host built on ratatui
//!
//! The host only draws what the viewer has already materialized; all navigation
//! and highlighting decisions live in [`crate::viewport`] and [`crate::highlight`].

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::{StatusLine, ViewState};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
