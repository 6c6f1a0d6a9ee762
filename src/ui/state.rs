//! What the terminal host draws each frame
//!
//! `ViewState` borrows the styled window straight from the viewer; `StatusLine` is
//! owned by the application and carries prompts and messages between frames.

use crate::highlight::StyledLine;
use crate::input::PromptKind;

/// One frame: the visible window plus the status line inputs
#[derive(Debug)]
pub struct ViewState<'a> {
    pub lines: &'a [StyledLine],
    pub filename: &'a str,
    pub offset: u64,
    pub file_size: u64,
    pub at_bottom: bool,
    pub status_line: &'a StatusLine,
}

impl ViewState<'_> {
    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(self.filename, self.offset, self.file_size, self.at_bottom)
    }
}

/// Status line content that persists between frames
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub is_error: bool,
    pub prompt: Option<(PromptKind, String)>,
    /// Source of the pattern in use, shown after the position
    pub pattern: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.is_error = false;
    }

    pub fn set_prompt(&mut self, kind: PromptKind, buffer: impl Into<String>) {
        self.prompt = Some((kind, buffer.into()));
    }

    pub fn clear_prompt(&mut self) {
        self.prompt = None;
    }

    /// Render the status text
    ///
    /// An open prompt replaces everything else; otherwise the line shows the file
    /// name, the position as a percentage of the file (or `END` at the bottom), the
    /// active pattern and any message.
    pub fn format_status_line(
        &self,
        filename: &str,
        offset: u64,
        file_size: u64,
        at_bottom: bool,
    ) -> String {
        if let Some((kind, buffer)) = &self.prompt {
            return format!("{}{}", kind.to_char(), buffer);
        }

        let position = if at_bottom {
            "END".to_string()
        } else {
            let percentage = (offset as f64 / file_size.max(1) as f64) * 100.0;
            format!("{:.0}%", percentage)
        };

        let mut parts = vec![filename.to_string(), position];
        if let Some(pattern) = &self.pattern {
            parts.push(format!("/{}", pattern));
        }
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        parts.join(" | ")
    }
}
