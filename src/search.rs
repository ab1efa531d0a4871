//! Search text entry.
//!
//! The search line filters the table live: every edit changes the text the
//! query engine sees, so callers refresh the view after each call that
//! returns `true`.

/// Search state.
#[derive(Debug)]
pub struct SearchState {
    is_active: bool,
    text: String,
}

impl SearchState {
    /// Create a new search state.
    pub fn new() -> Self {
        Self {
            is_active: false,
            text: String::new(),
        }
    }

    /// Check if the search line is taking input.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Start editing. The current text is kept so it can be refined.
    pub fn start(&mut self) {
        self.is_active = true;
    }

    /// Add a character to the search text.
    pub fn input(&mut self, c: char) -> bool {
        self.text.push(c);
        true
    }

    /// Remove the last character from the search text.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Stop editing and keep the filter.
    pub fn submit(&mut self) {
        self.is_active = false;
    }

    /// Stop editing and drop the filter.
    pub fn cancel(&mut self) -> bool {
        self.is_active = false;
        let had_text = !self.text.is_empty();
        self.text.clear();
        had_text
    }

    /// Get the search text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a non-blank filter is in effect.
    pub fn is_filtering(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_builds_text() {
        let mut search = SearchState::new();
        search.start();
        assert!(search.is_active());
        assert!(search.input('a'));
        assert!(search.input('m'));
        assert_eq!(search.text(), "am");
        assert!(search.backspace());
        assert_eq!(search.text(), "a");
    }

    #[test]
    fn test_backspace_on_empty_reports_no_change() {
        let mut search = SearchState::new();
        assert!(!search.backspace());
    }

    #[test]
    fn test_submit_keeps_filter_and_restart_resumes_it() {
        let mut search = SearchState::new();
        search.start();
        search.input('x');
        search.submit();
        assert!(!search.is_active());
        assert!(search.is_filtering());
        search.start();
        assert_eq!(search.text(), "x");
    }

    #[test]
    fn test_cancel_clears_filter() {
        let mut search = SearchState::new();
        search.start();
        search.input('x');
        assert!(search.cancel());
        assert!(!search.is_active());
        assert_eq!(search.text(), "");
        assert!(!search.cancel());
    }

    #[test]
    fn test_whitespace_is_not_filtering() {
        let mut search = SearchState::new();
        search.input(' ');
        assert!(!search.is_filtering());
    }
}
