//! Colours and text styles for the graph view.

use crate::figure::Rgb;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colours are disabled by the `NO_COLOR` environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR` (any value disables colours).
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Colours on or off regardless of the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }

    /// Terminal colour for a figure colour, or the terminal default when
    /// colours are off.
    pub fn color(self, rgb: Rgb) -> Color {
        if self.enabled {
            to_color(rgb)
        } else {
            Color::Reset
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Figure colour as a truecolor terminal colour.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub const EDGE_COLOR: Color = Color::Gray;
pub const SELECTED_EDGE_COLOR: Color = Color::Yellow;

pub fn title_text() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn muted_text() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn active_item() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan)
}

pub fn selected_label() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub fn message_text() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC)
}
