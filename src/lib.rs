//! csvpeek - A terminal viewer for CSV datasets.
//!
//! csvpeek loads one CSV file, shows it as a table that can be searched and
//! sorted by any column, and previews the images and links embedded in it.
//!
//! # Features
//!
//! - Background CSV loading with row-level diagnostics
//! - Live case-insensitive search across every column
//! - Three-state column sort with numeric-aware ordering
//! - Picture and link columns with an image preview overlay
//! - Clipboard integration
//!
//! # Example
//!
//! ```ignore
//! use csvpeek::data::CsvReader;
//! use csvpeek::query::{derive_view, SortDirective};
//! use std::path::Path;
//!
//! let dataset = CsvReader::read_path(Path::new("data/csv/people.csv"))?;
//! let view = derive_view(&dataset, "am", &SortDirective::none());
//! println!("{} of {} rows match", view.len(), dataset.row_count());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod search;
pub mod ui;
pub mod util;

pub use error::{CsvPeekError, Result};
