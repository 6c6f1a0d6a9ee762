//! Application orchestration layer
//!
//! Wires the input service, the viewer and a `UIRenderer` into a single-threaded
//! event loop. Each `InputAction` maps onto one viewer operation; the status line is
//! the only state this layer owns.

use crate::error::{HugeviewError, Result};
use crate::input::{InputAction, InputService, RawInputCollector, ScrollDirection};
use crate::ui::{StatusLine, UIRenderer, ViewState};
use crate::viewport::Viewer;
use std::time::Duration;

/// How long one loop iteration waits for terminal input
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application orchestrator
pub struct Application {
    viewer: Viewer,
    ui_renderer: Box<dyn UIRenderer>,
    input: InputService,
    status_line: StatusLine,
    filename: String,
}

impl Application {
    /// Wire a viewer to a renderer
    ///
    /// `mouse_scroll_lines` is the number of lines one wheel tick moves.
    pub fn new(viewer: Viewer, ui_renderer: Box<dyn UIRenderer>, mouse_scroll_lines: usize) -> Self {
        let filename = viewer
            .path()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<unnamed>".to_string());
        let mut status_line = StatusLine::new();
        status_line.pattern = viewer.pattern().map(|p| p.as_str().to_string());

        Self {
            viewer,
            ui_renderer,
            input: InputService::with_collector(
                RawInputCollector::new().with_scroll_lines(mouse_scroll_lines),
            ),
            status_line,
            filename,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    /// Run until the user quits
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop();
        let cleanup = self.ui_renderer.cleanup();
        result.and(cleanup)
    }

    fn event_loop(&mut self) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        self.process_action(InputAction::Resize { width, height });
        self.render()?;

        loop {
            let actions = self.input.poll_actions(Some(INPUT_POLL_INTERVAL))?;
            if actions.is_empty() {
                continue;
            }
            for action in actions {
                if !self.process_action(action) {
                    return Ok(());
                }
            }
            self.render()?;
        }
    }

    /// Draw the current window
    pub fn render(&mut self) -> Result<()> {
        let view_state = ViewState {
            lines: self.viewer.visible_lines(),
            filename: &self.filename,
            offset: self.viewer.offset(),
            file_size: self.viewer.file_size(),
            at_bottom: self.viewer.state().at_bottom(),
            status_line: &self.status_line,
        };
        self.ui_renderer.render(&view_state)
    }

    /// Apply one action; returns false when the application should quit
    pub fn process_action(&mut self, action: InputAction) -> bool {
        log::trace!("action: {:?}", action);

        match action {
            InputAction::Quit => return false,
            InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines,
            } => self.viewer.go_up(lines),
            InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines,
            } => self.viewer.go_down(lines),
            InputAction::PageUp => self.viewer.go_pageup(),
            InputAction::PageDown => self.viewer.go_pagedown(),
            InputAction::GoToStart => self.viewer.go_top(),
            InputAction::GoToEnd => self.viewer.go_bottom(),
            InputAction::GoToOffset(offset) => {
                self.status_line.clear_prompt();
                self.viewer.go_to_byte_offset(offset);
            }
            InputAction::InvalidOffset(text) => {
                self.status_line.clear_prompt();
                let error = HugeviewError::invalid_argument(format!(
                    "offset {text} does not fit in 64 bits"
                ));
                self.status_line.set_error(error.to_string());
                return true;
            }
            InputAction::StartPrompt(kind) => {
                self.status_line.set_prompt(kind, "");
                return true;
            }
            InputAction::UpdatePrompt { kind, buffer } => {
                self.status_line.set_prompt(kind, buffer);
                return true;
            }
            InputAction::CancelPrompt => {
                self.status_line.clear_prompt();
                return true;
            }
            InputAction::ApplyPattern(pattern) => {
                self.status_line.clear_prompt();
                self.apply_pattern(&pattern);
                return true;
            }
            InputAction::SearchNext => {
                self.search_next();
                return true;
            }
            InputAction::ClearPattern => {
                self.viewer.set_pattern(None);
                self.status_line.pattern = None;
            }
            InputAction::Resize { height, .. } => {
                // Last row belongs to the status line
                self.viewer.set_height(usize::from(height.saturating_sub(1)));
                return true;
            }
            InputAction::NoAction | InputAction::InvalidInput => return true,
        }

        self.status_line.clear_message();
        true
    }

    fn apply_pattern(&mut self, pattern: &str) {
        match self.viewer.set_pattern_str(Some(pattern)) {
            Ok(()) => {
                self.status_line.pattern = Some(pattern.to_string());
                self.status_line.clear_message();
            }
            Err(e) => {
                log::debug!("rejected pattern {:?}: {}", pattern, e);
                self.status_line.set_error(e.to_string());
            }
        }
    }

    fn search_next(&mut self) {
        if self.viewer.pattern().is_none() {
            self.status_line.set_error("No pattern");
        } else if self.viewer.search_next() {
            self.status_line.clear_message();
        } else {
            self.status_line.set_error("Pattern not found");
        }
    }
}
