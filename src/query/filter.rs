//! Free-text row filtering.

use crate::data::Record;

/// Check if a record matches a search query in any of the given columns.
///
/// Matching is a case-insensitive substring test. A query that is blank after
/// trimming matches every record; a non-blank query is used untrimmed.
pub fn matches_search(record: &Record, headers: &[String], query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let query_lower = query.to_lowercase();
    matches_lowered(record, headers, &query_lower)
}

/// Same as [`matches_search`] for a query that is already lowercase and non-blank.
pub(crate) fn matches_lowered(record: &Record, headers: &[String], query_lower: &str) -> bool {
    headers
        .iter()
        .any(|header| record.value(header).to_lowercase().contains(query_lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["name".to_string(), "age".to_string(), "city".to_string()]
    }

    #[test]
    fn test_matches_any_column_case_insensitively() {
        let record = Record::from_pairs([("name", "Amy"), ("age", "10"), ("city", "Oslo")]);
        assert!(matches_search(&record, &headers(), "am"));
        assert!(matches_search(&record, &headers(), "OSL"));
        assert!(matches_search(&record, &headers(), "10"));
        assert!(!matches_search(&record, &headers(), "bob"));
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let record = Record::new();
        assert!(matches_search(&record, &headers(), ""));
        assert!(matches_search(&record, &headers(), "   "));
    }

    #[test]
    fn test_absent_fields_never_match() {
        let record = Record::from_pairs([("name", "Amy")]);
        assert!(!matches_search(&record, &headers(), "undefined"));
    }

    #[test]
    fn test_only_listed_headers_are_searched() {
        let record = Record::from_pairs([("name", "Amy"), ("secret", "needle")]);
        assert!(!matches_search(&record, &headers(), "needle"));
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let record = Record::from_pairs([("name", "Amy Lee")]);
        assert!(matches_search(&record, &headers(), "y l"));
        assert!(!matches_search(&record, &headers(), " amy  "));
    }
}
