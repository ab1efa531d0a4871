//! Keymap help bar UI component.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let keymap_text = if app.preview.is_visible() {
        "o:open in viewer | any key/click:close"
    } else if app.search.is_active() {
        "Enter:keep filter | Esc:clear | Type to filter"
    } else if app.dataset.is_none() {
        "r:reload | q:quit"
    } else {
        "q:quit | hjkl:move | s:sort | /:search | Enter:open | y:copy | r:reload"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
