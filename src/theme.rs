//! Theme system for the TUI.
//!
//! A small fixed set of semantic styles resolved from a Dark or Light
//! palette. The variant is selected from config and can be cycled at
//! runtime.

use ratatui::style::{Color, Modifier, Style};

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Build the style set for this variant.
    pub fn theme(self) -> Theme {
        match self {
            Self::Dark => Theme::dark(),
            Self::Light => Theme::light(),
        }
    }
}

/// Semantic styles used across the screens.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Navigation header background line.
    pub header: Style,
    /// Header entry for the screen currently shown.
    pub header_active: Style,
    /// Regular body text.
    pub text: Style,
    /// Form field labels and topic titles.
    pub label: Style,
    /// User-visible error messages.
    pub error: Style,
    /// Borders of unfocused blocks.
    pub border: Style,
    /// Border of the focused input or the selected topic.
    pub border_focused: Style,
    /// Bottom status bar.
    pub status_bar: Style,
    /// Dimmed hint text (placeholders, key help inside dialogs).
    pub hint: Style,
}

impl Theme {
    fn dark() -> Self {
        Self {
            header: Style::default().bg(Color::Indexed(236)).fg(Color::Gray),
            header_active: Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            hint: Style::default().fg(Color::DarkGray),
        }
    }

    fn light() -> Self {
        Self {
            header: Style::default().bg(Color::Indexed(252)).fg(Color::Black),
            header_active: Style::default()
                .bg(Color::Indexed(252))
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::Black),
            label: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            border: Style::default().fg(Color::Gray),
            border_focused: Style::default().fg(Color::Blue),
            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            hint: Style::default().fg(Color::Gray),
        }
    }
}
