//! CSV file reader.

use super::{Dataset, DiagnosticKind, ParseDiagnostic, Record};
use crate::error::{CsvPeekError, Result};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// CSV data reader.
///
/// The first row names the columns. Empty lines are skipped, ragged rows are
/// kept, and per-row problems are collected as diagnostics instead of
/// aborting the read.
#[derive(Debug)]
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file from disk.
    pub fn read_path(path: &Path) -> Result<Dataset> {
        let file = File::open(path).map_err(|e| CsvPeekError::source_unavailable(path, e))?;
        Self::read_from(file, path)
    }

    /// Read CSV content from any reader. `source` is recorded on the dataset.
    pub fn read_from<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Dataset> {
        let source = source.into();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| CsvPeekError::parse_failure(&source, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        let mut diagnostics = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let row = idx + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => {
                    return Err(CsvPeekError::parse_failure(&source, e.to_string()));
                },
                Err(e) => {
                    diagnostics.push(ParseDiagnostic {
                        row,
                        kind: DiagnosticKind::InvalidRecord,
                        message: e.to_string(),
                    });
                    continue;
                },
            };

            if is_empty_row(&record) {
                continue;
            }

            if let Some(diagnostic) = check_width(row, record.len(), headers.len()) {
                diagnostics.push(diagnostic);
            }

            rows.push(Self::to_record(&headers, &record));
        }

        for diagnostic in &diagnostics {
            tracing::warn!("{}: {}", source.display(), diagnostic);
        }
        tracing::info!(
            "Parsed {} rows x {} columns from {} ({} diagnostics)",
            rows.len(),
            headers.len(),
            source.display(),
            diagnostics.len()
        );

        Ok(Dataset::new(source, headers, rows).with_diagnostics(diagnostics))
    }

    fn to_record(headers: &[String], fields: &StringRecord) -> Record {
        // zip stops at the shorter side: short rows leave keys absent, long rows drop the surplus
        Record::from_pairs(headers.iter().cloned().zip(fields.iter().map(str::to_string)))
    }
}

fn is_empty_row(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(str::is_empty)
}

fn check_width(row: usize, fields: usize, columns: usize) -> Option<ParseDiagnostic> {
    if fields < columns {
        Some(ParseDiagnostic {
            row,
            kind: DiagnosticKind::TooFewFields,
            message: format!("expected {} fields, found {}", columns, fields),
        })
    } else if fields > columns {
        Some(ParseDiagnostic {
            row,
            kind: DiagnosticKind::TooManyFields,
            message: format!("expected {} fields, found {}", columns, fields),
        })
    } else {
        None
    }
}
