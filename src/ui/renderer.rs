//! UI renderer trait
//!
//! The application draws through this trait so the event loop can run against a
//! real terminal or a mock in tests.

use crate::error::Result;
use crate::ui::ViewState;

/// Core trait for drawing frames
pub trait UIRenderer {
    /// Draw the window and the status line
    fn render(&mut self, view_state: &ViewState<'_>) -> Result<()>;

    /// Enter raw mode and the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal; safe to call more than once
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal dimensions as (width, height)
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
