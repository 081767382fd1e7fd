//! Integration tests for the browse loop.
//!
//! A slow catalog with paused tokio time makes response ordering
//! deterministic, so these check debouncing, search-vs-browse branching and
//! stale-response handling end to end.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use browse::{BrowseInput, BrowseOrchestrator, BrowseView, run_browse_loop};
use catalog::{CatalogProvider, Listing, MovieRecord, SortMode};
use curation::Curator;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

/// Popular listing takes 2s, searches take 100ms
struct SlowCatalog {
    calls: Mutex<Vec<(Listing, Duration)>>,
    start: Instant,
}

impl SlowCatalog {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            start: Instant::now(),
        }
    }

    fn calls(&self) -> Vec<(Listing, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

fn record(id: u64, title: &str, rating: f64) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        poster_path: None,
        rating,
        popularity: id as f64,
        release_date: None,
    }
}

#[async_trait]
impl CatalogProvider for SlowCatalog {
    fn name(&self) -> &str {
        "slow"
    }

    async fn fetch(&self, listing: &Listing) -> catalog::Result<Vec<MovieRecord>> {
        self.calls
            .lock()
            .unwrap()
            .push((listing.clone(), self.start.elapsed()));
        match listing {
            Listing::Popular => {
                sleep(Duration::from_secs(2)).await;
                Ok((1..=30).map(|id| record(id, &format!("Popular {}", id), 5.0)).collect())
            }
            Listing::Search(query) => {
                sleep(Duration::from_millis(100)).await;
                Ok(vec![
                    record(100, &format!("{} (1984)", query), 6.5),
                    record(101, &format!("{} (2021)", query), 8.0),
                ])
            }
        }
    }
}

type Frames = Arc<Mutex<Vec<(Duration, BrowseView)>>>;

async fn run(
    catalog: Arc<SlowCatalog>,
    inputs: mpsc::UnboundedReceiver<BrowseInput>,
) -> (BrowseOrchestrator, Vec<(Duration, BrowseView)>) {
    let start = Instant::now();
    let frames: Frames = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&frames);

    let orchestrator = BrowseOrchestrator::new(catalog, Curator::new());
    let orchestrator = run_browse_loop(orchestrator, inputs, Duration::from_millis(500), |view| {
        sink.lock().unwrap().push((start.elapsed(), view.clone()));
    })
    .await;

    let frames = frames.lock().unwrap().clone();
    (orchestrator, frames)
}

#[tokio::test(start_paused = true)]
async fn test_search_supersedes_slow_popular_fetch() {
    let catalog = Arc::new(SlowCatalog::new());
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(BrowseInput::Text("d".to_string())).unwrap();
    tx.send(BrowseInput::Text("du".to_string())).unwrap();
    tx.send(BrowseInput::Text("dune".to_string())).unwrap();
    drop(tx);

    let (orchestrator, frames) = run(Arc::clone(&catalog), rx).await;

    // Only one search reached the catalog, after the debounce delay
    let calls = catalog.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, Listing::Popular);
    assert_eq!(calls[1], (Listing::Search("dune".to_string()), Duration::from_millis(500)));

    // The popular response arrived later and was discarded
    assert_eq!(frames.len(), 1);
    let (at, view) = &frames[0];
    assert_eq!(*at, Duration::from_millis(600));
    assert_eq!(view.search_text, "dune");
    assert!(view.carousel.is_none());
    assert_eq!(view.grid.len(), 2);

    assert_eq!(orchestrator.results().len(), 2);
    assert!(!orchestrator.view().pending);
}

#[tokio::test(start_paused = true)]
async fn test_browse_then_sort_and_page() {
    let catalog = Arc::new(SlowCatalog::new());
    let (tx, rx) = mpsc::unbounded_channel();

    let driver = tokio::spawn(run(Arc::clone(&catalog), rx));

    sleep(Duration::from_secs(3)).await;
    tx.send(BrowseInput::Sort(SortMode::Popularity)).unwrap();
    tx.send(BrowseInput::Page(2)).unwrap();
    drop(tx);

    let (_, frames) = driver.await.unwrap();
    assert_eq!(frames.len(), 3);

    let (at, first) = &frames[0];
    assert_eq!(*at, Duration::from_secs(2));
    assert_eq!(first.carousel.as_ref().map(Vec::len), Some(5));
    assert_eq!(first.grid.len(), 20);

    let (_, sorted) = &frames[1];
    assert_eq!(sorted.sort_mode, SortMode::Popularity);
    assert_eq!(sorted.grid[0].id, 30);

    let (_, paged) = &frames[2];
    assert_eq!(paged.page, 2);
    let ids: Vec<_> = paged.grid.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=10).rev().collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn test_clearing_search_returns_to_browse() {
    let catalog = Arc::new(SlowCatalog::new());
    let (tx, rx) = mpsc::unbounded_channel();
    let driver = tokio::spawn(run(Arc::clone(&catalog), rx));

    sleep(Duration::from_secs(3)).await;
    tx.send(BrowseInput::Text("alien".to_string())).unwrap();
    sleep(Duration::from_secs(1)).await;
    tx.send(BrowseInput::Text(String::new())).unwrap();
    drop(tx);

    let (orchestrator, frames) = driver.await.unwrap();
    let searched: Vec<_> = frames.iter().map(|(_, v)| v.search_text.clone()).collect();
    assert_eq!(searched, vec!["", "alien", ""]);

    let last = &frames.last().unwrap().1;
    assert!(last.carousel.is_some());
    assert_eq!(orchestrator.results().len(), 30);
}
