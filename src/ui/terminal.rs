//! Terminal UI implementation using ratatui
//!
//! Draws the styled window above a one-row status line. The window is already
//! exactly as tall as the content area, so nothing here scrolls or wraps.

use crate::error::{HugeviewError, Result};
use crate::highlight::StyledLine;
use crate::ui::{ColorTheme, UIRenderer, ViewState};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout, Write};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI with a crossterm backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Self {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Self {
        Self {
            terminal: None,
            theme,
        }
    }

    /// Convert styled spans to a ratatui line using theme colors
    fn to_line<'a>(line: &'a StyledLine, theme: &ColorTheme) -> Line<'a> {
        Line::from(
            line.iter()
                .map(|span| Span::styled(span.text.as_str(), theme.span_style(span.style)))
                .collect::<Vec<_>>(),
        )
    }

    fn render_content(frame: &mut Frame, area: Rect, view_state: &ViewState<'_>, theme: &ColorTheme) {
        let lines: Vec<Line> = view_state
            .lines
            .iter()
            .map(|line| Self::to_line(line, theme))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState<'_>, theme: &ColorTheme) {
        let mut style = theme.status_style();
        if view_state.status_line.is_error && view_state.status_line.prompt.is_none() {
            style = Style::default().bg(theme.status_bg).fg(theme.error_text);
        }
        let status = Paragraph::new(view_state.format_status_line()).style(style);
        frame.render_widget(status, area);
    }

    fn enter_screen() -> io::Result<CrosstermTerminal> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    /// Undo a partial setup after raw mode was already enabled
    fn abort_setup(out: &mut impl Write, err: io::Error) -> HugeviewError {
        log::warn!("terminal setup failed, restoring: {}", err);
        let _ = execute!(out, LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
        HugeviewError::ui(format!("terminal setup failed: {err}"))
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState<'_>) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(frame.size());

                Self::render_content(frame, chunks[0], view_state, theme);
                Self::render_status(frame, chunks[1], view_state, theme);
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        match Self::enter_screen() {
            Ok(terminal) => {
                self.terminal = Some(terminal);
                Ok(())
            }
            Err(e) => Err(Self::abort_setup(&mut io::stdout(), e)),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.take().is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
