//! Status bar UI component.

use super::formatters::format_number;
use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the status bar.
pub fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let text = if app.search.is_active() {
        format!("/{}", app.search.text())
    } else {
        app.status.clone()
    };

    let summary = summary(app, colors);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(summary.width() as u16),
        ])
        .split(area);

    let style = Style::default().fg(colors.status_fg).bg(colors.status_bg);
    f.render_widget(Paragraph::new(text).style(style), chunks[0]);
    f.render_widget(Paragraph::new(summary).style(style), chunks[1]);
}

/// Right-hand side: parse problems, active sort, filter and row counts.
fn summary(app: &App, colors: &ThemeColors) -> Line<'static> {
    let Some(ref dataset) = app.dataset else {
        return Line::default();
    };

    let mut spans = vec![Span::raw(" ")];
    if !dataset.diagnostics.is_empty() {
        spans.push(Span::styled(
            format!("⚠ {} problems", format_number(dataset.diagnostics.len())),
            Style::default().fg(colors.warning),
        ));
        spans.push(Span::raw(" | "));
    }

    let mut parts = Vec::new();
    if app.sort.is_active() {
        parts.push(format!("sort: {} {}", app.sort.key, app.sort.direction.name()));
    }
    if app.search.is_filtering() && !app.search.is_active() {
        parts.push(format!("filter: '{}'", app.search.text()));
    }
    parts.push(format!(
        "{}/{} rows",
        format_number(app.view.len()),
        format_number(dataset.row_count())
    ));
    spans.push(Span::raw(format!("{} ", parts.join(" | "))));
    Line::from(spans)
}
