//! # Browse Orchestrator
//!
//! Coordinates one browsing session:
//! 1. Hold the user's `QueryState` (search text, sort mode, page)
//! 2. Decide search vs. popular browse from the settled search text
//! 3. Start catalog fetches tagged with a request generation
//! 4. Accept responses, dropping any that a newer fetch has superseded
//! 5. Curate the active result set into a `BrowseView` for rendering
//!
//! Fetches are split into [`FetchRequest`] (runs anywhere, owns nothing of
//! the session) and [`BrowseOrchestrator::apply`] (updates the session), so
//! a front end can keep accepting input while a fetch is in flight.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use catalog::{CatalogProvider, Listing, MovieRecord, SortMode};
use curation::{Curator, DEFAULT_PAGER_WIDTH, PageButton, page_count, pager_window};
use search::{QueryState, RequestGeneration, Ticket};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseView {
    /// Top of the sorted order; `None` while searching
    pub carousel: Option<Vec<MovieRecord>>,
    pub grid: Vec<MovieRecord>,
    pub pager: Vec<PageButton>,
    pub sort_mode: SortMode,
    pub page: i64,
    pub search_text: String,
    /// Total records in the active result set
    pub total: usize,
    /// A fetch is still outstanding
    pub pending: bool,
}

impl BrowseView {
    /// Nothing to show yet: the grid renders its loading/empty state
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// A fetch started by the orchestrator, ready to run off the session.
pub struct FetchRequest {
    ticket: Ticket,
    listing: Listing,
    catalog: Arc<dyn CatalogProvider>,
}

impl FetchRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Run the fetch. Failures are logged and become an empty result set.
    pub async fn run(self) -> FetchResponse {
        let start = Instant::now();
        let records = match self.catalog.fetch(&self.listing).await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Catalog {} failed for {:?}: {}",
                    self.catalog.name(),
                    self.listing,
                    e
                );
                Vec::new()
            }
        };
        debug!(
            "Fetch #{} for {:?} returned {} records in {:.2?}",
            self.ticket.value(),
            self.listing,
            records.len(),
            start.elapsed()
        );
        FetchResponse {
            ticket: self.ticket,
            listing: self.listing,
            records,
        }
    }
}

/// Result of a [`FetchRequest`], to be handed back to the orchestrator
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub ticket: Ticket,
    pub listing: Listing,
    pub records: Vec<MovieRecord>,
}

/// State and wiring for one browsing session
pub struct BrowseOrchestrator {
    catalog: Arc<dyn CatalogProvider>,
    curator: Curator,
    generation: RequestGeneration,
    state: QueryState,
    results: Vec<MovieRecord>,
    pending: bool,
}

impl BrowseOrchestrator {
    /// Create an orchestrator with an empty result set.
    ///
    /// # Arguments
    /// * `catalog` - Shared catalog provider used for every fetch
    /// * `curator` - Page and carousel sizes
    pub fn new(catalog: Arc<dyn CatalogProvider>, curator: Curator) -> Self {
        Self {
            catalog,
            curator,
            generation: RequestGeneration::new(),
            state: QueryState::new(),
            results: Vec::new(),
            pending: false,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn results(&self) -> &[MovieRecord] {
        &self.results
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.state.set_sort_mode(mode);
    }

    pub fn set_page(&mut self, page: i64) {
        self.state.set_page(page);
    }

    /// Start a fetch for the listing the current state selects.
    ///
    /// Any fetch started earlier is superseded from this point on.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        let ticket = self.generation.begin();
        let listing = self.state.listing();
        self.pending = true;
        info!("Starting fetch #{} for {:?}", ticket.value(), listing);
        FetchRequest {
            ticket,
            listing,
            catalog: Arc::clone(&self.catalog),
        }
    }

    /// Apply a settled search text.
    ///
    /// Returns a fetch to run when the text changed, `None` when it is the
    /// same query as before.
    pub fn settle_search(&mut self, text: impl Into<String>) -> Option<FetchRequest> {
        if self.state.settle_search(text) {
            Some(self.begin_fetch())
        } else {
            debug!("Search text unchanged, keeping current results");
            None
        }
    }

    /// Install a fetch response unless a newer fetch superseded it.
    ///
    /// Returns `true` when the response replaced the result set.
    pub fn apply(&mut self, response: FetchResponse) -> bool {
        if !self.generation.is_current(response.ticket) {
            debug!(
                "Discarding stale fetch #{} for {:?} (current #{})",
                response.ticket.value(),
                response.listing,
                self.generation.current().value()
            );
            return false;
        }
        info!(
            "Installed {} records for {:?}",
            response.records.len(),
            response.listing
        );
        self.results = response.records;
        self.pending = false;
        true
    }

    /// Fetch for the current state and apply the result in one step.
    pub async fn refresh(&mut self) -> bool {
        let response = self.begin_fetch().run().await;
        self.apply(response)
    }

    /// Settle a search and, if it changed, fetch in one step.
    pub async fn search(&mut self, text: impl Into<String>) -> bool {
        match self.settle_search(text) {
            Some(request) => {
                let response = request.run().await;
                self.apply(response)
            }
            None => false,
        }
    }

    /// Curate the active result set for rendering.
    pub fn view(&self) -> BrowseView {
        let mode = self.state.sort_mode();
        let page = self.state.page();
        let searching = self.state.is_searching();

        let carousel = (!searching).then(|| self.curator.carousel(&self.results, mode));
        let grid = self.curator.page(&self.results, mode, page);
        let pages = page_count(self.results.len(), self.curator.page_size());

        BrowseView {
            carousel,
            grid,
            pager: pager_window(page, pages, DEFAULT_PAGER_WIDTH),
            sort_mode: mode,
            page,
            search_text: self.state.search_text().to_string(),
            total: self.results.len(),
            pending: self.pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogError, StaticCatalog};
    use async_trait::async_trait;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn record(id: u64, title: &str, rating: f64) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            rating,
            popularity: 100.0 - id as f64,
            release_date: None,
        }
    }

    fn build_catalog() -> Arc<dyn CatalogProvider> {
        let mut records: Vec<_> = (1..=45)
            .map(|id| record(id, &format!("Movie {}", id), (id % 10) as f64))
            .collect();
        records.push(record(100, "Dune", 8.1));
        records.push(record(101, "Dune: Part Two", 8.6));
        Arc::new(StaticCatalog::new(records))
    }

    struct FailingCatalog;

    #[async_trait]
    impl CatalogProvider for FailingCatalog {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _listing: &Listing) -> catalog::Result<Vec<MovieRecord>> {
            Err(CatalogError::Api {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[tokio::test]
    async fn test_browse_shows_carousel_and_first_page() {
        let mut orchestrator = BrowseOrchestrator::new(build_catalog(), Curator::new());
        assert!(orchestrator.view().is_empty());

        assert!(orchestrator.refresh().await);
        let view = orchestrator.view();

        assert_eq!(view.total, 47);
        assert_eq!(view.grid.len(), 20);
        assert_eq!(view.carousel.as_ref().map(Vec::len), Some(5));
        assert_eq!(view.pager.len(), 3);
        assert!(!view.pending);
    }

    #[tokio::test]
    async fn test_search_hides_carousel_and_resets_page() {
        let mut orchestrator = BrowseOrchestrator::new(build_catalog(), Curator::new());
        orchestrator.refresh().await;
        orchestrator.set_page(2);

        assert!(orchestrator.search("dune").await);
        let view = orchestrator.view();
        assert_eq!(view.page, 1);
        assert!(view.carousel.is_none());
        assert_eq!(view.grid.len(), 2);

        // Same text again does not refetch
        assert!(!orchestrator.search("dune").await);
    }

    #[tokio::test]
    async fn test_sort_applies_to_grid() {
        let mut orchestrator = BrowseOrchestrator::new(build_catalog(), Curator::new());
        orchestrator.search("dune").await;
        orchestrator.set_sort_mode(SortMode::Rating);

        let titles: Vec<_> = orchestrator.view().grid.into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Dune: Part Two", "Dune"]);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mut orchestrator = BrowseOrchestrator::new(build_catalog(), Curator::new());

        let popular = orchestrator.begin_fetch();
        let dune = orchestrator.settle_search("dune").expect("search changed");

        // Newer response lands first, then the superseded one
        let dune_response = dune.run().await;
        let popular_response = popular.run().await;

        assert!(orchestrator.apply(dune_response));
        assert!(!orchestrator.apply(popular_response));
        assert_eq!(orchestrator.results().len(), 2);
    }

    #[tokio::test]
    async fn test_pending_until_current_response() {
        let mut orchestrator = BrowseOrchestrator::new(build_catalog(), Curator::new());
        let first = orchestrator.begin_fetch();
        let second = orchestrator.begin_fetch();

        assert!(!orchestrator.apply(first.run().await));
        assert!(orchestrator.view().pending);
        assert!(orchestrator.apply(second.run().await));
        assert!(!orchestrator.view().pending);
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_empty_results() {
        let mut orchestrator = BrowseOrchestrator::new(build_catalog(), Curator::new());
        orchestrator.refresh().await;
        assert_eq!(orchestrator.results().len(), 47);

        let mut failing = BrowseOrchestrator::new(Arc::new(FailingCatalog), Curator::new());
        assert!(failing.refresh().await);
        let view = failing.view();
        assert!(view.is_empty());
        assert!(view.grid.is_empty());
        assert_eq!(view.pager.len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_empty_grid() {
        let mut orchestrator = BrowseOrchestrator::new(build_catalog(), Curator::new());
        orchestrator.refresh().await;

        orchestrator.set_page(9);
        assert!(orchestrator.view().grid.is_empty());
        orchestrator.set_page(0);
        assert!(orchestrator.view().grid.is_empty());
    }
}
