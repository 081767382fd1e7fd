//! The user's current query: search text, sort mode and page.

use catalog::{Listing, SortMode};

/// Mutated only by user interaction; not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    sort_mode: SortMode,
    page: i64,
}

impl QueryState {
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            sort_mode: SortMode::default(),
            page: 1,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Listing the current search text selects
    pub fn listing(&self) -> Listing {
        Listing::from_query(&self.search_text)
    }

    pub fn is_searching(&self) -> bool {
        self.listing().is_search()
    }

    /// Apply a settled search. A non-empty query starts again at page 1.
    ///
    /// Returns `false` when the text is unchanged, in which case nothing
    /// needs refetching.
    pub fn settle_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        // Whitespace-only differences select the same listing
        if Listing::from_query(&text) == self.listing() {
            self.search_text = text;
            return false;
        }
        self.search_text = text;
        if self.is_searching() {
            self.page = 1;
        }
        true
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Pages are not validated here; curation turns an out-of-range page
    /// into an empty grid.
    pub fn set_page(&mut self, page: i64) {
        self.page = page;
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}
