//! Color themes for the terminal host
//!
//! Styles are plain ratatui `Style`s; the theme only decides which one each
//! [`SpanStyle`] and the status line use.

use crate::config::ThemeName;
use crate::highlight::SpanStyle;
use ratatui::style::{Color, Modifier, Style};

/// Colors for text, highlights and the status line
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Hits of the pattern in use
    pub active_match: Style,

    /// Hits of the last pattern that matched, shown while the current one matches nothing
    pub stale_match: Style,

    pub status_bg: Color,
    pub status_fg: Color,

    /// Status line messages reporting a failure
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None,
            active_match: Style::default().fg(Color::Black).bg(Color::Yellow),
            stale_match: Style::default().fg(Color::Black).bg(Color::DarkGray),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            active_match: Style::default().add_modifier(Modifier::REVERSED),
            stale_match: Style::default().add_modifier(Modifier::UNDERLINED),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            active_match: Style::default().fg(Color::Black).bg(Color::LightYellow),
            stale_match: Style::default().fg(Color::Black).bg(Color::LightCyan),
            status_bg: Color::White,
            status_fg: Color::Black,
            error_text: Color::LightRed,
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Monochrome => Self::monochrome(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Style applied to a span of the given kind
    pub fn span_style(&self, style: SpanStyle) -> Style {
        match style {
            SpanStyle::None => match self.normal_text {
                Some(color) => Style::default().fg(color),
                None => Style::default(),
            },
            SpanStyle::ActiveMatch => self.active_match,
            SpanStyle::StaleMatch => self.stale_match,
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}
