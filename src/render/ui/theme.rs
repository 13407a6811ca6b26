//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for terminal rendering using ratatui's
//! color system directly to avoid unnecessary abstractions.

use crate::window::TextBlock;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Highlighted substring
    pub highlight: Style,

    /// Rows carrying the error tag
    pub error_text: Color,

    /// Rows from the most recent batch
    pub just_added: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Gutter marker for a run of error rows
    pub error_gutter: Style,

    /// Gutter marker for a run of new rows
    pub new_gutter: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None, // Use terminal default
            highlight: Style::default().fg(Color::Black).bg(Color::Yellow),
            error_text: Color::Red,
            just_added: Style::default().add_modifier(Modifier::BOLD),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_gutter: Style::default().fg(Color::Red),
            new_gutter: Style::default().fg(Color::Green),
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            highlight: Style::default().add_modifier(Modifier::REVERSED),
            error_text: Color::White,
            just_added: Style::default().add_modifier(Modifier::BOLD),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_gutter: Style::default().add_modifier(Modifier::BOLD),
            new_gutter: Style::default(),
        }
    }

    /// Style for one text block; the highlight wins over row-level colors.
    pub fn block_style(&self, block: &TextBlock) -> Style {
        let mut style = Style::default();
        if let Some(color) = self.normal_text {
            style = style.fg(color);
        }
        if block.is_error {
            style = style.fg(self.error_text);
        }
        if block.is_just_added {
            style = style.patch(self.just_added);
        }
        if block.is_highlighted {
            style = style.patch(self.highlight);
        }
        style
    }
}
