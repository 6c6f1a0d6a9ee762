//! The viewport navigation engine.
//!
//! [`ViewportState`] holds the window position; [`Viewer`] drives it over a
//! [`LineScanner`](crate::file_handler::LineScanner) and hands the visible block to a
//! [`LineRenderer`](crate::highlight::LineRenderer).

pub mod navigation;
pub mod state;

pub use navigation::Viewer;
pub use state::ViewportState;
