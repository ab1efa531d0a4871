//! Layout configuration constants for the table view.

/// Configuration for table view layout.
#[derive(Debug, Clone)]
pub struct TableLayoutConfig {
    /// Widest a regular text column may grow.
    pub max_column_width: usize,
    /// Values longer than this mark a column as long text.
    pub long_text_threshold: usize,
    /// Width given to long-text columns.
    pub long_text_width: usize,
    /// Blank cells between adjacent columns.
    pub column_spacing: u16,
    /// Width reserved for a header's sort glyph (glyph plus one space).
    pub indicator_width: usize,
}

impl Default for TableLayoutConfig {
    fn default() -> Self {
        Self {
            max_column_width: 30,
            long_text_threshold: 50,
            long_text_width: 50,
            column_spacing: 1,
            indicator_width: 2,
        }
    }
}
