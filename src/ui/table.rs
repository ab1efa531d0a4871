//! Table rendering: sortable header, per-column cell policies and the
//! geometry used for mouse hit-testing.

use super::cell::{alt_text, single_line, CellContent, CellKind, LINK_LABEL, NO_IMAGE};
use super::formatters::format_number;
use super::ThemeColors;
use crate::app::App;
use crate::query::{DerivedView, SortDirection};
use crate::util::TableLayoutConfig;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Horizontal extent of one drawn column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// Left edge.
    pub x: u16,
    /// Drawn width.
    pub width: u16,
    /// Index into the view's headers.
    pub column: usize,
}

/// Where the last draw put the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableGeometry {
    /// Row of the header line.
    pub header_y: u16,
    /// First body row.
    pub body_y: u16,
    /// Number of body rows drawn.
    pub body_height: u16,
    /// View index of the first body row.
    pub row_offset: usize,
    /// Rows in the view.
    pub row_count: usize,
    /// Drawn columns, left to right.
    pub columns: Vec<ColumnSpan>,
}

/// Result of hit-testing a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A header control.
    Header(usize),
    /// A body cell, by view row and column index.
    Cell {
        /// View row.
        row: usize,
        /// Column index.
        column: usize,
    },
}

impl TableGeometry {
    /// Map a screen position to the header or cell under it.
    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        let column = self
            .columns
            .iter()
            .find(|span| x >= span.x && x < span.x.saturating_add(span.width))?
            .column;

        if y == self.header_y {
            return Some(Hit::Header(column));
        }
        if y >= self.body_y && y < self.body_y.saturating_add(self.body_height) {
            let row = self.row_offset + usize::from(y - self.body_y);
            if row < self.row_count {
                return Some(Hit::Cell { row, column });
            }
        }
        None
    }
}

/// Width of every column of `view`.
///
/// Link and picture columns are sized to their label. Text columns fit their
/// widest value up to `max_column_width`; a column holding values longer than
/// `long_text_threshold` gets `long_text_width` instead.
pub fn column_widths(view: &DerivedView, layout: &TableLayoutConfig) -> Vec<usize> {
    view.headers
        .iter()
        .map(|header| {
            let header_width = header.width() + layout.indicator_width;
            match CellKind::for_column(header) {
                CellKind::Link => header_width.max(LINK_LABEL.len()),
                CellKind::Thumbnail => {
                    let caption = view
                        .rows
                        .iter()
                        .map(|row| alt_text(row).width() + 2)
                        .max()
                        .unwrap_or(0)
                        .min(layout.max_column_width);
                    header_width.max(NO_IMAGE.len()).max(caption)
                },
                CellKind::Text => {
                    let content = view
                        .rows
                        .iter()
                        .map(|row| single_line(row.value(header)).width())
                        .max()
                        .unwrap_or(0);
                    if content > layout.long_text_threshold {
                        layout.long_text_width
                    } else {
                        header_width.max(content).min(layout.max_column_width)
                    }
                },
            }
        })
        .collect()
}

/// Choose which columns to draw so that `focus` is visible.
///
/// Returns the adjusted column offset and the visible column indices. When
/// not even one column fits, the first one is drawn truncated.
pub fn fit_columns(
    widths: &[usize],
    spacing: usize,
    offset: usize,
    focus: usize,
    available: usize,
) -> (usize, Vec<usize>) {
    if widths.is_empty() {
        return (0, Vec::new());
    }
    let focus = focus.min(widths.len() - 1);
    let mut offset = offset.min(focus);
    loop {
        let visible = columns_from(widths, spacing, offset, available);
        if visible.contains(&focus) || offset >= focus {
            return (offset, visible);
        }
        offset += 1;
    }
}

fn columns_from(widths: &[usize], spacing: usize, offset: usize, available: usize) -> Vec<usize> {
    let mut visible = Vec::new();
    let mut used = 0;
    for (idx, &width) in widths.iter().enumerate().skip(offset) {
        let needed = if visible.is_empty() {
            width
        } else {
            used + spacing + width
        };
        if needed <= available {
            visible.push(idx);
            used = needed;
        } else {
            if visible.is_empty() {
                visible.push(idx);
            }
            break;
        }
    }
    visible
}

/// Adjust a scroll offset so that `cursor` is inside a window of `height` rows.
pub fn scroll_to(offset: usize, cursor: usize, height: usize) -> usize {
    if height == 0 || cursor < offset {
        cursor
    } else if cursor >= offset + height {
        cursor + 1 - height
    } else {
        offset
    }
}

/// Glyph after a header name: the live direction, or a neutral hint on the
/// focused column.
pub fn sort_indicator(direction: SortDirection, focused: bool) -> &'static str {
    match direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
        SortDirection::Unsorted if focused => "⇅",
        SortDirection::Unsorted => "",
    }
}

/// Draw the table for the current view.
pub(super) fn draw_table(f: &mut Frame<'_>, app: &mut App, area: Rect, colors: &ThemeColors) {
    let block = Block::default()
        .title(table_title(app))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        app.geometry = TableGeometry::default();
        return;
    }

    let spacing = app.layout.column_spacing;
    let (col_offset, visible) = fit_columns(
        &app.column_widths,
        usize::from(spacing),
        app.col_offset,
        app.cursor_col,
        usize::from(inner.width),
    );
    app.col_offset = col_offset;

    let body_height = usize::from(inner.height.saturating_sub(1));
    app.row_offset = scroll_to(app.row_offset, app.cursor_row, body_height);

    let mut spans = Vec::with_capacity(visible.len());
    let mut x = inner.x;
    let right = inner.x + inner.width;
    for (i, &column) in visible.iter().enumerate() {
        if i > 0 {
            x = x.saturating_add(spacing);
        }
        let remaining = usize::from(right.saturating_sub(x));
        let width = app.column_widths[column].min(remaining) as u16;
        if width == 0 {
            break;
        }
        spans.push(ColumnSpan { x, width, column });
        x = x.saturating_add(width);
    }

    // Header
    for span in &spans {
        let header = &app.view.headers[span.column];
        let focused = span.column == app.cursor_col;
        let direction = app.sort.direction_for(header);
        let indicator_style = if direction == SortDirection::Unsorted {
            Style::default().fg(colors.muted)
        } else {
            Style::default().fg(colors.label)
        };
        let mut name_style = Style::default()
            .fg(colors.heading)
            .add_modifier(Modifier::BOLD);
        if focused {
            name_style = name_style.add_modifier(Modifier::UNDERLINED);
        }
        let line = Line::from(vec![
            Span::styled(header.clone(), name_style),
            Span::raw(" "),
            Span::styled(sort_indicator(direction, focused), indicator_style),
        ]);
        f.render_widget(Paragraph::new(line), Rect::new(span.x, inner.y, span.width, 1));
    }

    // Body
    let end = (app.row_offset + body_height).min(app.view.len());
    for (line_idx, view_row) in (app.row_offset..end).enumerate() {
        let y = inner.y + 1 + line_idx as u16;
        let record = &app.view.rows[view_row];
        let focused_row = view_row == app.cursor_row;

        if focused_row {
            let row_area = Rect::new(inner.x, y, inner.width, 1);
            f.render_widget(
                Paragraph::new("").style(Style::default().bg(colors.row_highlight)),
                row_area,
            );
        }

        for span in &spans {
            let header = &app.view.headers[span.column];
            let content = CellContent::for_cell(header, record, &app.assets.pics_base);
            let available = content.is_available();
            let mut style = cell_style(&content, available, colors);
            if focused_row {
                style = if span.column == app.cursor_col {
                    style
                        .fg(colors.cursor_fg)
                        .bg(colors.cursor_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    style.bg(colors.row_highlight)
                };
            }
            f.render_widget(
                Paragraph::new(content.label(available)).style(style),
                Rect::new(span.x, y, span.width, 1),
            );
        }
    }

    app.geometry = TableGeometry {
        header_y: inner.y,
        body_y: inner.y + 1,
        body_height: (end - app.row_offset) as u16,
        row_offset: app.row_offset,
        row_count: app.view.len(),
        columns: spans,
    };
}

fn cell_style(content: &CellContent, available: bool, colors: &ThemeColors) -> Style {
    match content {
        CellContent::Link { .. } => Style::default()
            .fg(colors.link)
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
        CellContent::Thumbnail { .. } if !available => Style::default()
            .fg(colors.muted)
            .add_modifier(Modifier::ITALIC),
        CellContent::Thumbnail { .. } => Style::default().fg(colors.label),
        CellContent::Text(_) | CellContent::Empty => Style::default().fg(colors.text),
    }
}

fn table_title(app: &App) -> String {
    let name = app
        .dataset
        .as_ref()
        .map(|d| d.display_name())
        .unwrap_or_default();
    let total = app.dataset.as_ref().map(|d| d.row_count()).unwrap_or(0);
    format!(
        " {} · {} of {} rows ",
        name,
        format_number(app.view.len()),
        format_number(total)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::ui::ImageSource;
    use std::sync::Arc;

    fn view(headers: &[&str], rows: Vec<Record>) -> DerivedView {
        DerivedView {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.into_iter().map(Arc::new).collect(),
        }
    }

    #[test]
    fn test_text_column_fits_content_up_to_cap() {
        let layout = TableLayoutConfig::default();
        let v = view(
            &["id", "title"],
            vec![
                Record::from_pairs([("id", "7".to_string()), ("title", "x".repeat(40))]),
                Record::from_pairs([("id", "12345")]),
            ],
        );
        assert_eq!(column_widths(&v, &layout), vec![5, 30]);
    }

    #[test]
    fn test_long_text_column_is_widened() {
        let layout = TableLayoutConfig::default();
        let v = view(&["bio"], vec![Record::from_pairs([("bio", "y".repeat(80))])]);
        assert_eq!(column_widths(&v, &layout), vec![layout.long_text_width]);
    }

    #[test]
    fn test_compact_columns_sized_to_labels() {
        let layout = TableLayoutConfig::default();
        let v = view(
            &["link", "pics"],
            vec![Record::from_pairs([
                ("name", "Tom"),
                ("link", "https://very.long.example.com/path/that/is/long"),
                ("pics", "tom.jpg"),
            ])],
        );
        // "link" + indicator = 6; "No Image" = 8
        assert_eq!(column_widths(&v, &layout), vec![6, 8]);
    }

    #[test]
    fn test_fit_columns_scrolls_to_focus() {
        let widths = [10, 10, 10, 10];
        assert_eq!(fit_columns(&widths, 1, 0, 0, 25), (0, vec![0, 1]));
        assert_eq!(fit_columns(&widths, 1, 0, 3, 25), (2, vec![2, 3]));
        assert_eq!(fit_columns(&widths, 1, 3, 1, 25), (1, vec![1, 2]));
    }

    #[test]
    fn test_fit_columns_truncates_oversized_column() {
        assert_eq!(fit_columns(&[50, 5], 1, 0, 0, 20), (0, vec![0]));
        assert_eq!(fit_columns(&[], 1, 4, 2, 20), (0, vec![]));
    }

    #[test]
    fn test_scroll_to_keeps_cursor_in_window() {
        assert_eq!(scroll_to(0, 3, 10), 0);
        assert_eq!(scroll_to(0, 12, 10), 3);
        assert_eq!(scroll_to(5, 2, 10), 2);
        assert_eq!(scroll_to(5, 2, 0), 2);
    }

    #[test]
    fn test_sort_indicator_per_state() {
        assert_eq!(sort_indicator(SortDirection::Ascending, false), "▲");
        assert_eq!(sort_indicator(SortDirection::Descending, true), "▼");
        assert_eq!(sort_indicator(SortDirection::Unsorted, true), "⇅");
        assert_eq!(sort_indicator(SortDirection::Unsorted, false), "");
    }

    #[test]
    fn test_cell_style_follows_given_availability() {
        let colors = ThemeColors::default();
        // The path is never checked: the caller's flag decides the style.
        let content = CellContent::Thumbnail {
            source: ImageSource::Local("no/such/file.jpg".into()),
            alt: "Tom".to_string(),
        };
        assert_eq!(cell_style(&content, true, &colors).fg, Some(colors.label));
        assert_eq!(cell_style(&content, false, &colors).fg, Some(colors.muted));
    }

    #[test]
    fn test_geometry_hit_testing() {
        let geometry = TableGeometry {
            header_y: 1,
            body_y: 2,
            body_height: 3,
            row_offset: 10,
            row_count: 12,
            columns: vec![
                ColumnSpan { x: 1, width: 5, column: 0 },
                ColumnSpan { x: 7, width: 4, column: 1 },
            ],
        };
        assert_eq!(geometry.hit(2, 1), Some(Hit::Header(0)));
        assert_eq!(geometry.hit(8, 2), Some(Hit::Cell { row: 10, column: 1 }));
        assert_eq!(geometry.hit(8, 3), Some(Hit::Cell { row: 11, column: 1 }));
        // Past the last row of the view.
        assert_eq!(geometry.hit(8, 4), None);
        // Spacing between columns.
        assert_eq!(geometry.hit(6, 2), None);
        assert_eq!(TableGeometry::default().hit(0, 0), None);
    }
}
