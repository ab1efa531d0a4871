//! Column sorting: the three-state sort cycle and the row comparator.

use crate::data::Record;
use std::cmp::Ordering;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// No ordering is applied; rows keep their filtered order.
    #[default]
    Unsorted,
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Get the next direction in the cycle.
    pub fn next(self) -> Self {
        match self {
            SortDirection::Unsorted => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Unsorted,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            SortDirection::Unsorted => "unsorted",
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortDirective {
    /// Column name, empty when no column was ever activated.
    pub key: String,
    /// Current direction for `key`.
    pub direction: SortDirection,
}

impl SortDirective {
    /// A directive that orders nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a directive for a column.
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Whether rows should be reordered at all.
    pub fn is_active(&self) -> bool {
        !self.key.is_empty() && self.direction != SortDirection::Unsorted
    }

    /// Apply one activation of `column`.
    ///
    /// The same column cycles unsorted → ascending → descending → unsorted.
    /// A different column always starts at ascending.
    pub fn activate(&mut self, column: &str) {
        if self.key == column {
            self.direction = self.direction.next();
        } else {
            self.key = column.to_string();
            self.direction = SortDirection::Ascending;
        }
    }

    /// Direction shown for `column`: the live direction if it is the sort key.
    pub fn direction_for(&self, column: &str) -> SortDirection {
        if self.key == column {
            self.direction
        } else {
            SortDirection::Unsorted
        }
    }
}

/// Compare two rows on `key`.
///
/// When both values carry a number (after dropping everything but digits,
/// `.` and `-`) they compare numerically. Otherwise the lowercase values
/// compare by code point, absent values counting as empty. Descending swaps
/// the operands.
pub fn compare_rows(a: &Record, b: &Record, key: &str, direction: SortDirection) -> Ordering {
    let (x, y) = match direction {
        SortDirection::Ascending => (a, b),
        SortDirection::Descending => (b, a),
        SortDirection::Unsorted => return Ordering::Equal,
    };
    let x = x.value(key);
    let y = y.value(key);

    if let (Some(xn), Some(yn)) = (numeric_value(x), numeric_value(y)) {
        return xn.partial_cmp(&yn).unwrap_or(Ordering::Equal);
    }

    x.to_lowercase().cmp(&y.to_lowercase())
}

/// Numeric reading of a cell: strip to digits, `.` and `-`, then parse the
/// longest leading decimal number.
///
/// `"$1,200"` reads as `1200`, `"-"` and `""` read as nothing.
pub fn numeric_value(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_leading_number(&stripped)
}

fn parse_leading_number(s: &str) -> Option<f64> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let int_part = &rest[..int_len];
    let frac_part = match rest[int_len..].strip_prefix('.') {
        Some(after_dot) => {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            &after_dot[..frac_len]
        },
        None => "",
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }
    normalized.parse().ok()
}

/// Stable merge sort.
///
/// `slice::sort_by` may panic when the comparator is not a total order, and
/// the mixed numeric/text comparator is not one for every column.
pub(crate) fn stable_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = stable_sort_by(left, compare);
    let right = stable_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // Ties take from the left run.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
