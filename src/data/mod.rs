//! Data reading and representation.
//!
//! This module handles reading CSV files into an in-memory [`Dataset`] and
//! running those reads off the UI thread.

mod dataset;
mod loader;
mod reader;

pub use dataset::{Dataset, DiagnosticKind, ParseDiagnostic, Record};
pub use loader::{LoadOutcome, LoadToken, Loader};
pub use reader::CsvReader;
