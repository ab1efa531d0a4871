//! Query engine: turns a dataset, a search text and a sort directive into
//! the rows that are shown.
//!
//! Everything here is pure. [`derive_view`] is recomputed whenever one of its
//! inputs changes; nothing is cached between calls.

mod filter;
mod sort;

pub use filter::matches_search;
pub use sort::{compare_rows, numeric_value, SortDirection, SortDirective};

use crate::data::{Dataset, Record};
use std::sync::Arc;

/// The filtered and ordered rows of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedView {
    /// Same headers as the dataset.
    pub headers: Vec<String>,
    /// Matching rows in display order.
    pub rows: Vec<Arc<Record>>,
}

impl DerivedView {
    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the view has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Filter and order the rows of `dataset`.
///
/// A row is kept when `search` is blank or at least one column contains it
/// (case-insensitive). Kept rows are then sorted stably by `sort` unless the
/// directive is inactive, in which case source order is preserved.
pub fn derive_view(dataset: &Dataset, search: &str, sort: &SortDirective) -> DerivedView {
    let rows: Vec<Arc<Record>> = if search.trim().is_empty() {
        dataset.rows.clone()
    } else {
        let query_lower = search.to_lowercase();
        dataset
            .rows
            .iter()
            .filter(|row| filter::matches_lowered(row, &dataset.headers, &query_lower))
            .cloned()
            .collect()
    };

    let rows = if sort.is_active() {
        sort::stable_sort_by(rows, &mut |a: &Arc<Record>, b: &Arc<Record>| {
            compare_rows(a, b, &sort.key, sort.direction)
        })
    } else {
        rows
    };

    DerivedView {
        headers: dataset.headers.clone(),
        rows,
    }
}
