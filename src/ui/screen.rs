//! Top-level screen layout.

use super::keymap_bar::draw_keymap;
use super::preview::draw_preview;
use super::status_bar::draw_status;
use super::table::{draw_table, TableGeometry};
use super::ThemeColors;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the whole screen.
pub(super) fn draw_screen(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::default();

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    draw_content(f, app, chunks[0], &colors);

    draw_status(f, chunks[1], app, &colors);

    draw_keymap(f, chunks[2], app, &colors);

    // Overlays
    draw_preview(f, &app.preview, &colors);
}

fn draw_content(f: &mut Frame<'_>, app: &mut App, area: Rect, colors: &ThemeColors) {
    if app.loading {
        app.geometry = TableGeometry::default();
        draw_message(
            f,
            area,
            vec![Line::from(Span::styled(
                "Loading data...",
                Style::default().fg(colors.label),
            ))],
            colors,
        );
        return;
    }

    if let Some(ref message) = app.error_message {
        app.geometry = TableGeometry::default();
        let lines = vec![
            Line::from(Span::styled(
                "Error Loading Dataset",
                Style::default()
                    .fg(colors.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(message.clone(), Style::default().fg(colors.text))),
        ];
        draw_message(f, area, lines, colors);
        return;
    }

    if app.dataset.is_none() {
        app.geometry = TableGeometry::default();
        draw_welcome(f, area, colors);
        return;
    }

    if app.view.is_empty() {
        app.geometry = TableGeometry::default();
        draw_message(
            f,
            area,
            vec![Line::from(Span::styled(
                "No data matches your search.",
                Style::default().fg(colors.muted),
            ))],
            colors,
        );
        return;
    }

    draw_table(f, app, area, colors);
}

fn draw_message(f: &mut Frame<'_>, area: Rect, lines: Vec<Line<'static>>, colors: &ThemeColors) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Vertically centre the message
    let top = inner.height.saturating_sub(lines.len() as u16) / 2;
    let body = Rect::new(inner.x, inner.y + top, inner.width, inner.height - top);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, body);
}

fn draw_welcome(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "Welcome to csvpeek!",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Usage: csvpeek <dataset.csv> [--data-dir DIR]"),
        Line::from(""),
        Line::from("Keyboard shortcuts:"),
        Line::from("  hjkl or arrows - Move between cells"),
        Line::from("  s              - Cycle sort on the focused column"),
        Line::from("  /              - Search"),
        Line::from("  Enter          - Preview image / open link"),
        Line::from("  y              - Copy cell"),
        Line::from("  r              - Reload"),
        Line::from("  q              - Quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" csvpeek ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .style(Style::default().fg(colors.text));

    f.render_widget(paragraph, area);
}
