//! Image preview overlay.

use super::cell::ImageSource;
use super::formatters::format_bytes;
use super::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The image currently shown enlarged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    /// Where the image lives.
    pub source: ImageSource,
    /// Caption.
    pub alt: String,
}

/// State for the preview overlay. At most one image is shown at a time.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    image: Option<PreviewImage>,
}

impl PreviewState {
    /// Create a closed preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an image, replacing any other.
    pub fn open(&mut self, source: ImageSource, alt: impl Into<String>) {
        self.image = Some(PreviewImage {
            source,
            alt: alt.into(),
        });
    }

    /// Close the overlay.
    pub fn close(&mut self) {
        self.image = None;
    }

    /// Is the overlay visible.
    pub fn is_visible(&self) -> bool {
        self.image.is_some()
    }

    /// The image being previewed.
    pub fn image(&self) -> Option<&PreviewImage> {
        self.image.as_ref()
    }
}

/// Draw the preview overlay.
pub fn draw_preview(f: &mut Frame<'_>, state: &PreviewState, colors: &ThemeColors) {
    let Some(image) = state.image() else {
        return;
    };

    let area = centered_rect(70, 50, f.area());

    // Clear the background
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Image Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.heading))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let available = image.source.is_available();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            image.alt.clone(),
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Source: ", Style::default().fg(colors.label)),
            Span::styled(image.source.location(), Style::default().fg(colors.text)),
        ]),
    ];

    let detail = match (&image.source, available) {
        (_, false) => Span::styled("No Image", Style::default().fg(colors.error)),
        (ImageSource::Remote(_), true) => {
            Span::styled("Remote image", Style::default().fg(colors.text))
        },
        (ImageSource::Local(_), true) => Span::styled(
            image
                .source
                .file_size()
                .map(format_bytes)
                .unwrap_or_else(|| "Local image".to_string()),
            Style::default().fg(colors.text),
        ),
    };
    lines.push(Line::from(vec![
        Span::styled("Image: ", Style::default().fg(colors.label)),
        detail,
    ]));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, chunks[0]);

    let hint = Paragraph::new("o: open in viewer | any other key or click: close")
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.muted));
    f.render_widget(hint, chunks[1]);
}

/// Helper function to create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
