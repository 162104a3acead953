//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Colors used by the selector widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Border color when the selector has focus.
    pub focused_border: Color,
    /// Border color when the selector does not have focus.
    pub border: Color,
    /// Tag chip color.
    pub tag: Color,
    /// Placeholder and disabled text.
    pub muted: Color,
    /// Inline error text.
    pub error: Color,
    /// Highlight background for the dropdown cursor.
    pub highlight: Color,
}

impl Theme {
    /// Border style for the given focus state.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style of the highlighted dropdown row.
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focused_border: Color::Yellow,
            border: Color::DarkGray,
            tag: Color::Blue,
            muted: Color::DarkGray,
            error: Color::Red,
            highlight: Color::DarkGray,
        }
    }
}
