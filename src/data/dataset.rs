//! Dataset information.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One CSV row, keyed by column name.
///
/// A blank field is stored as the empty string. A field that is missing
/// because the source row was short has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs. Later pairs win on repeated columns.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set the value for a column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Get the raw value of a column, `None` when the row had no such field.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Get the value of a column with absent fields coerced to `""`.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Category of a non-fatal parser finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The row had fewer fields than there are headers.
    TooFewFields,
    /// The row had more fields than there are headers; the surplus was dropped.
    TooManyFields,
    /// The row could not be decoded and was skipped.
    InvalidRecord,
}

/// A row-level problem found while parsing. Never blocks loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Human-readable detail.
    pub message: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {:?}: {}", self.row, self.kind, self.message)
    }
}

/// A fully loaded CSV source.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Path the data was read from.
    pub source: PathBuf,
    /// Column names in source order.
    pub headers: Vec<String>,
    /// Records in source order.
    pub rows: Vec<Arc<Record>>,
    /// Row-level findings collected while parsing.
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl Dataset {
    /// Create a dataset without diagnostics.
    pub fn new(source: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows: rows.into_iter().map(Arc::new).collect(),
            diagnostics: Vec::new(),
        }
    }

    /// Attach parser diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: Vec<ParseDiagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Number of records.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// File name of the source, for titles.
    pub fn display_name(&self) -> String {
        display_name(&self.source)
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
