//! Color theme for the UI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Background color.
    pub bg: Color,
    /// Primary text color.
    pub text: Color,
    /// Heading text color.
    pub heading: Color,
    /// Label text color.
    pub label: Color,
    /// Dimmed text (neutral sort glyph, hints).
    pub muted: Color,
    /// Link label color.
    pub link: Color,
    /// Border color.
    pub border: Color,
    /// Focused row background.
    pub row_highlight: Color,
    /// Cursor foreground color.
    pub cursor_fg: Color,
    /// Cursor background color.
    pub cursor_bg: Color,
    /// Status bar foreground color.
    pub status_fg: Color,
    /// Status bar background color.
    pub status_bg: Color,
    /// Warning color.
    pub warning: Color,
    /// Error color.
    pub error: Color,
}

impl ThemeColors {
    /// Gruvbox dark palette.
    pub fn gruvbox_dark() -> Self {
        Self {
            bg: Color::Rgb(40, 40, 40),
            text: Color::Rgb(235, 219, 178),
            heading: Color::Rgb(251, 184, 108),
            label: Color::Rgb(184, 187, 38),
            muted: Color::Rgb(146, 131, 116),
            link: Color::Rgb(131, 165, 152),
            border: Color::Rgb(102, 92, 84),
            row_highlight: Color::Rgb(60, 56, 54),
            cursor_fg: Color::Rgb(40, 40, 40),
            cursor_bg: Color::Rgb(251, 184, 108),
            status_fg: Color::Rgb(235, 219, 178),
            status_bg: Color::Rgb(60, 56, 54),
            warning: Color::Rgb(250, 189, 47),
            error: Color::Rgb(251, 73, 52),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}
