//! Application state and logic.
//!
//! [`App`] owns the dataset, the search text and the sort directive. Every
//! change to one of those calls [`App::refresh_view`], which recomputes the
//! derived view from scratch.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AssetConfig;
use crate::data::{Dataset, LoadOutcome, Loader, Record};
use crate::error::CsvPeekError;
use crate::query::{derive_view, DerivedView, SortDirection, SortDirective};
use crate::search::SearchState;
use crate::ui::cell::NO_IMAGE;
use crate::ui::table::column_widths;
use crate::ui::{CellContent, Hit, PreviewState, TableGeometry};
use crate::util::{copy_to_clipboard, open_external, TableLayoutConfig};

/// What activating a cell does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellAction {
    /// Show the image overlay.
    Preview,
    /// The image cannot be found.
    Unavailable,
    /// Open a URL externally.
    Open(String),
    /// Echo a text value in the status bar.
    Show(String),
    /// Nothing to do.
    Nothing,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Asset locations.
    pub assets: AssetConfig,
    /// Column sizing rules.
    pub layout: TableLayoutConfig,
    /// Path of the current (or loading) dataset.
    pub source: Option<PathBuf>,
    /// Loaded dataset.
    pub dataset: Option<Dataset>,
    /// Rows currently shown.
    pub view: DerivedView,
    /// Search state.
    pub search: SearchState,
    /// Active sort.
    pub sort: SortDirective,
    /// Image preview overlay.
    pub preview: PreviewState,
    /// Background loader.
    pub loader: Loader,
    /// Status message.
    pub status: String,
    /// Loading indicator.
    pub loading: bool,
    /// Error message.
    pub error_message: Option<String>,
    /// Focused row in the view.
    pub cursor_row: usize,
    /// Focused column.
    pub cursor_col: usize,
    /// First visible row.
    pub row_offset: usize,
    /// First visible column.
    pub col_offset: usize,
    /// Width of every column of the view.
    pub column_widths: Vec<usize>,
    /// Table placement from the last draw.
    pub geometry: TableGeometry,
}

impl App {
    /// Create a new application instance.
    pub fn new(assets: AssetConfig) -> Self {
        Self {
            assets,
            layout: TableLayoutConfig::default(),
            source: None,
            dataset: None,
            view: DerivedView::default(),
            search: SearchState::new(),
            sort: SortDirective::none(),
            preview: PreviewState::new(),
            loader: Loader::new(),
            status: "Ready".to_string(),
            loading: false,
            error_message: None,
            cursor_row: 0,
            cursor_col: 0,
            row_offset: 0,
            col_offset: 0,
            column_widths: Vec::new(),
            geometry: TableGeometry::default(),
        }
    }

    /// Start loading a dataset in the background.
    pub fn load(&mut self, path: PathBuf) {
        self.loading = true;
        self.error_message = None;
        self.dataset = None;
        self.preview.close();
        self.refresh_view();
        self.status = format!(
            "Loading {}...",
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "dataset".to_string())
        );
        self.loader.start(path.clone());
        self.source = Some(path);
    }

    /// Load the current source again.
    pub fn reload(&mut self) {
        match self.source.clone() {
            Some(path) => self.load(path),
            None => self.status = "No dataset to reload".to_string(),
        }
    }

    /// Apply a finished load, if one has arrived.
    pub fn poll_loader(&mut self) -> bool {
        match self.loader.poll() {
            Some(outcome) => {
                self.finish_load(outcome);
                true
            },
            None => false,
        }
    }

    /// Block until the pending load finishes or `timeout` elapses.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        match self.loader.wait(timeout) {
            Some(outcome) => {
                self.finish_load(outcome);
                true
            },
            None => false,
        }
    }

    /// Apply the outcome of a load.
    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        self.loading = false;
        match outcome.result {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => self.set_load_error(&e),
        }
    }

    /// Replace the dataset. Search text and sort carry over.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let name = dataset.display_name();
        let problems = dataset.diagnostics.len();
        self.status = if problems > 0 {
            format!(
                "{} loaded: {} rows ({} rows with problems, see log)",
                name,
                dataset.row_count(),
                problems
            )
        } else {
            format!("{} loaded: {} rows", name, dataset.row_count())
        };
        tracing::info!(
            "Dataset {} ready: {} columns, {} rows, {} diagnostics",
            name,
            dataset.column_count(),
            dataset.row_count(),
            problems
        );

        self.source = Some(dataset.source.clone());
        self.dataset = Some(dataset);
        self.error_message = None;
        self.loading = false;
        self.cursor_row = 0;
        self.row_offset = 0;
        self.refresh_view();
    }

    /// Record a failed load.
    pub fn set_load_error(&mut self, error: &CsvPeekError) {
        tracing::error!("Error loading dataset: {}", error);
        self.dataset = None;
        self.loading = false;
        self.error_message = Some(error.to_string());
        self.status = "Error loading dataset".to_string();
        self.refresh_view();
    }

    /// Recompute the view from the dataset, search text and sort.
    pub fn refresh_view(&mut self) {
        self.view = match self.dataset {
            Some(ref dataset) => derive_view(dataset, self.search.text(), &self.sort),
            None => DerivedView::default(),
        };
        self.column_widths = column_widths(&self.view, &self.layout);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor_row = self.cursor_row.min(self.view.len().saturating_sub(1));
        self.cursor_col = self.cursor_col.min(self.view.headers.len().saturating_sub(1));
    }

    // Sorting

    /// Activate the sort control of column `column`.
    pub fn activate_sort(&mut self, column: usize) {
        let Some(header) = self.view.headers.get(column).cloned() else {
            return;
        };
        self.sort.activate(&header);
        self.cursor_col = column;
        self.status = match self.sort.direction {
            SortDirection::Unsorted => "Sort cleared".to_string(),
            direction => format!("Sorted by {} ({})", header, direction.name()),
        };
        tracing::debug!("Sort is now {:?}", self.sort);
        self.refresh_view();
    }

    /// Activate the sort control of the focused column.
    pub fn sort_focused_column(&mut self) {
        self.activate_sort(self.cursor_col);
    }

    // Search

    /// Begin typing a search.
    pub fn search_start(&mut self) {
        self.search.start();
    }

    /// Type a character into the search line.
    pub fn search_input(&mut self, c: char) {
        if self.search.input(c) {
            self.search_changed();
        }
    }

    /// Delete the last search character.
    pub fn search_backspace(&mut self) {
        if self.search.backspace() {
            self.search_changed();
        }
    }

    /// Leave the search line, keeping the filter.
    pub fn search_submit(&mut self) {
        self.search.submit();
        self.status = if self.search.is_filtering() {
            format!("{} rows match '{}'", self.view.len(), self.search.text())
        } else {
            "Ready".to_string()
        };
    }

    /// Leave the search line and drop the filter.
    pub fn search_cancel(&mut self) {
        if self.search.cancel() {
            self.search_changed();
        }
        self.status = "Search cleared".to_string();
    }

    fn search_changed(&mut self) {
        tracing::debug!("Search text is now {:?}", self.search.text());
        self.cursor_row = 0;
        self.row_offset = 0;
        self.refresh_view();
    }

    // Navigation

    /// Move the cursor up.
    pub fn move_up(&mut self, n: usize) {
        self.cursor_row = self.cursor_row.saturating_sub(n);
    }

    /// Move the cursor down.
    pub fn move_down(&mut self, n: usize) {
        self.cursor_row = (self.cursor_row + n).min(self.view.len().saturating_sub(1));
    }

    /// Move the cursor left.
    pub fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    /// Move the cursor right.
    pub fn move_right(&mut self) {
        self.cursor_col = (self.cursor_col + 1).min(self.view.headers.len().saturating_sub(1));
    }

    /// Jump to the first row.
    pub fn goto_first(&mut self) {
        self.cursor_row = 0;
    }

    /// Jump to the last row.
    pub fn goto_last(&mut self) {
        self.cursor_row = self.view.len().saturating_sub(1);
    }

    // Cells

    /// Name of the focused column.
    pub fn focused_header(&self) -> Option<&str> {
        self.view.headers.get(self.cursor_col).map(String::as_str)
    }

    /// The focused row.
    pub fn focused_record(&self) -> Option<&Arc<Record>> {
        self.view.rows.get(self.cursor_row)
    }

    /// Content of the focused cell.
    pub fn focused_content(&self) -> Option<CellContent> {
        let header = self.focused_header()?;
        let record = self.focused_record()?;
        Some(CellContent::for_cell(header, record, &self.assets.pics_base))
    }

    /// What activating the focused cell would do.
    pub fn focused_action(&self) -> CellAction {
        match self.focused_content() {
            Some(CellContent::Thumbnail { source, .. }) if source.is_available() => {
                CellAction::Preview
            },
            Some(CellContent::Thumbnail { .. }) => CellAction::Unavailable,
            Some(CellContent::Link { url }) => CellAction::Open(url),
            Some(CellContent::Text(value)) => CellAction::Show(value),
            Some(CellContent::Empty) | None => CellAction::Nothing,
        }
    }

    /// Activate the focused cell: preview an image, open a link or show text.
    pub fn activate_focused_cell(&mut self) {
        match self.focused_action() {
            CellAction::Preview => {
                if let Some(CellContent::Thumbnail { source, alt }) = self.focused_content() {
                    self.status = format!("Previewing {}", alt);
                    self.preview.open(source, alt);
                }
            },
            CellAction::Unavailable => {
                self.status = NO_IMAGE.to_string();
            },
            CellAction::Open(url) => {
                self.status = match open_external(&url) {
                    Ok(()) => format!("Opened {}", url),
                    Err(e) => e.to_string(),
                };
            },
            CellAction::Show(value) => {
                self.status = if value.is_empty() {
                    "Empty cell".to_string()
                } else {
                    value
                };
            },
            CellAction::Nothing => {},
        }
    }

    /// Hand the previewed image to the system viewer.
    pub fn open_preview_external(&mut self) {
        let Some(image) = self.preview.image() else {
            return;
        };
        let location = image.source.location();
        self.status = match open_external(&location) {
            Ok(()) => format!("Opened {}", location),
            Err(e) => e.to_string(),
        };
    }

    /// Close the image preview.
    pub fn close_preview(&mut self) {
        self.preview.close();
    }

    /// Copy the raw value of the focused cell.
    pub fn copy_focused_cell(&mut self) {
        let Some(header) = self.focused_header().map(str::to_string) else {
            self.status = "Nothing to copy".to_string();
            return;
        };
        let value = self
            .focused_record()
            .map(|record| record.value(&header).to_string())
            .unwrap_or_default();
        self.status = match copy_to_clipboard(&value) {
            Ok(()) => format!("Copied {}!", header),
            Err(e) => format!("Copy failed: {}", e),
        };
    }

    /// Handle a left click at a screen position.
    pub fn click(&mut self, x: u16, y: u16) {
        if self.preview.is_visible() {
            self.close_preview();
            return;
        }
        match self.geometry.hit(x, y) {
            Some(Hit::Header(column)) => self.activate_sort(column),
            Some(Hit::Cell { row, column }) => {
                self.cursor_row = row;
                self.cursor_col = column;
                self.activate_focused_cell();
            },
            None => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::table::ColumnSpan;
    use crate::ui::ImageSource;
    use std::io::Write;

    fn people() -> Dataset {
        Dataset::new(
            "people.csv",
            vec!["name".to_string(), "age".to_string(), "pics".to_string()],
            vec![
                Record::from_pairs([("name", "Bob"), ("age", "30"), ("pics", "bob.jpg")]),
                Record::from_pairs([("name", "Amy"), ("age", "25"), ("pics", "amy.jpg")]),
                Record::from_pairs([("name", "Cal"), ("age", "41"), ("pics", "")]),
            ],
        )
    }

    fn names(app: &App) -> Vec<String> {
        app.view
            .rows
            .iter()
            .map(|r| r.value("name").to_string())
            .collect()
    }

    #[test]
    fn test_set_dataset_builds_view() {
        let mut app = App::new(AssetConfig::default());
        app.set_dataset(people());
        assert_eq!(names(&app), vec!["Bob", "Amy", "Cal"]);
        assert_eq!(app.column_widths.len(), 3);
        assert!(app.status.contains("3 rows"));
    }

    #[test]
    fn test_sort_cycle_through_app() {
        let mut app = App::new(AssetConfig::default());
        app.set_dataset(people());

        app.activate_sort(1);
        assert_eq!(names(&app), vec!["Amy", "Bob", "Cal"]);
        app.activate_sort(1);
        assert_eq!(names(&app), vec!["Cal", "Bob", "Amy"]);
        app.activate_sort(1);
        assert_eq!(names(&app), vec!["Bob", "Amy", "Cal"]);
        assert_eq!(app.status, "Sort cleared");

        app.cursor_col = 0;
        app.sort_focused_column();
        assert_eq!(app.sort.key, "name");
        assert_eq!(app.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_search_filters_live_and_cancel_restores() {
        let mut app = App::new(AssetConfig::default());
        app.set_dataset(people());
        app.move_down(2);

        app.search_start();
        app.search_input('a');
        app.search_input('m');
        assert_eq!(names(&app), vec!["Amy"]);
        assert_eq!(app.cursor_row, 0);

        app.search_backspace();
        assert_eq!(names(&app), vec!["Amy", "Cal"]);

        app.search_submit();
        assert!(!app.search.is_active());
        assert_eq!(names(&app), vec!["Amy", "Cal"]);

        app.search_cancel();
        assert_eq!(names(&app), vec!["Bob", "Amy", "Cal"]);
    }

    #[test]
    fn test_whitespace_search_keeps_all_rows() {
        let mut app = App::new(AssetConfig::default());
        app.set_dataset(people());
        app.search_start();
        app.search_input(' ');
        assert_eq!(app.view.len(), 3);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut app = App::new(AssetConfig::default());
        app.set_dataset(people());
        app.move_down(10);
        assert_eq!(app.cursor_row, 2);
        app.move_right();
        app.move_right();
        app.move_right();
        assert_eq!(app.cursor_col, 2);
        app.move_up(10);
        app.move_left();
        assert_eq!((app.cursor_row, app.cursor_col), (0, 1));
    }

    #[test]
    fn test_thumbnail_activation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bob.jpg"), b"jpeg").unwrap();
        let mut app = App::new(AssetConfig {
            csv_base: dir.path().to_path_buf(),
            pics_base: dir.path().to_path_buf(),
        });
        app.set_dataset(people());
        app.cursor_col = 2;

        assert_eq!(app.focused_action(), CellAction::Preview);
        app.activate_focused_cell();
        let image = app.preview.image().unwrap();
        assert_eq!(image.alt, "Bob");
        assert_eq!(image.source, ImageSource::Local(dir.path().join("bob.jpg")));

        app.close_preview();
        app.move_down(1);
        assert_eq!(app.focused_action(), CellAction::Unavailable);
        app.activate_focused_cell();
        assert!(!app.preview.is_visible());
        assert_eq!(app.status, NO_IMAGE);
    }

    #[test]
    fn test_link_and_text_actions() {
        let mut app = App::new(AssetConfig::default());
        app.set_dataset(Dataset::new(
            "links.csv",
            vec!["title".to_string(), "link".to_string()],
            vec![
                Record::from_pairs([("title", "Home"), ("link", "https://example.com")]),
                Record::from_pairs([("title", "Nowhere"), ("link", "")]),
            ],
        ));

        app.cursor_col = 1;
        assert_eq!(
            app.focused_action(),
            CellAction::Open("https://example.com".to_string())
        );
        app.move_down(1);
        assert_eq!(app.focused_action(), CellAction::Nothing);

        app.cursor_col = 0;
        app.activate_focused_cell();
        assert_eq!(app.status, "Nowhere");
    }

    #[test]
    fn test_click_routes_through_geometry() {
        let mut app = App::new(AssetConfig::default());
        app.set_dataset(people());
        app.geometry = TableGeometry {
            header_y: 1,
            body_y: 2,
            body_height: 3,
            row_offset: 0,
            row_count: 3,
            columns: vec![
                ColumnSpan { x: 1, width: 6, column: 0 },
                ColumnSpan { x: 8, width: 5, column: 1 },
            ],
        };

        app.click(9, 1);
        assert_eq!(app.sort.key, "age");
        assert_eq!(names(&app), vec!["Amy", "Bob", "Cal"]);

        app.click(2, 4);
        assert_eq!((app.cursor_row, app.cursor_col), (2, 0));
        assert_eq!(app.status, "Cal");

        app.preview
            .open(ImageSource::Remote("https://x/y.png".into()), "Y");
        app.click(9, 1);
        assert!(!app.preview.is_visible());
        assert_eq!(app.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_background_load_and_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name,age\nBob,30\n").unwrap();

        let mut app = App::new(AssetConfig::default());
        app.load(file.path().to_path_buf());
        assert!(app.loading);
        assert!(app.dataset.is_none());

        assert!(app.wait_for_load(Duration::from_secs(10)));
        assert!(!app.loading);
        assert_eq!(app.view.len(), 1);

        app.activate_sort(0);
        writeln!(file, "Amy,25").unwrap();
        app.reload();
        assert!(app.wait_for_load(Duration::from_secs(10)));
        assert_eq!(app.view.len(), 2);
        assert_eq!(app.sort.key, "name");
        assert_eq!(app.view.rows[0].value("name"), "Amy");
    }

    #[test]
    fn test_failed_load_sets_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(AssetConfig::default());
        app.load(dir.path().join("missing.csv"));
        assert!(app.wait_for_load(Duration::from_secs(10)));
        assert!(app.error_message.is_some());
        assert!(app.dataset.is_none());
        assert!(app.view.is_empty());
    }

    #[test]
    fn test_reload_without_source() {
        let mut app = App::new(AssetConfig::default());
        app.reload();
        assert_eq!(app.status, "No dataset to reload");
        assert!(!app.loading);
    }
}
