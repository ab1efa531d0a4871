//! User interface rendering.

pub mod cell;
mod formatters;
mod keymap_bar;
pub mod preview;
mod screen;
mod status_bar;
pub mod table;
mod theme;

use crate::app::App;
use ratatui::Frame;

pub use cell::{CellContent, CellKind, ImageSource};
pub use preview::PreviewState;
pub use table::{Hit, TableGeometry};
pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    screen::draw_screen(f, app);
}
