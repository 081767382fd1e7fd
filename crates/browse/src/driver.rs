//! Event loop tying raw user input to the orchestrator.
//!
//! Search text goes through the debouncer; sort and page changes apply
//! immediately. Fetches run as separate tasks so input keeps flowing while
//! they are in flight, and their responses come back through a channel
//! where stale ones are dropped by the orchestrator.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use catalog::SortMode;
use search::Debouncer;

use crate::orchestrator::{BrowseOrchestrator, BrowseView, FetchRequest, FetchResponse};

/// One user interaction
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseInput {
    /// Current contents of the search box
    Text(String),
    Sort(SortMode),
    Page(i64),
}

fn spawn_fetch(request: FetchRequest, responses: &mpsc::UnboundedSender<FetchResponse>) {
    let responses = responses.clone();
    tokio::spawn(async move {
        let _ = responses.send(request.run().await);
    });
}

/// Run the browse loop until `inputs` closes and every outstanding fetch
/// and pending search has resolved.
///
/// Starts with a popular-listing fetch. `render` is called whenever the
/// visible state changes.
pub async fn run_browse_loop<F>(
    mut orchestrator: BrowseOrchestrator,
    mut inputs: mpsc::UnboundedReceiver<BrowseInput>,
    debounce: Duration,
    mut render: F,
) -> BrowseOrchestrator
where
    F: FnMut(&BrowseView),
{
    let (debouncer, mut settled) = Debouncer::spawn(debounce);
    let mut debouncer = Some(debouncer);
    let (responses_tx, mut responses) = mpsc::unbounded_channel();

    let mut in_flight = 1usize;
    spawn_fetch(orchestrator.begin_fetch(), &responses_tx);

    let mut inputs_open = true;
    let mut settled_open = true;

    while inputs_open || settled_open || in_flight > 0 {
        tokio::select! {
            input = inputs.recv(), if inputs_open => match input {
                Some(BrowseInput::Text(text)) => {
                    if let Some(debouncer) = &debouncer {
                        debouncer.push(text);
                    }
                }
                Some(BrowseInput::Sort(mode)) => {
                    orchestrator.set_sort_mode(mode);
                    render(&orchestrator.view());
                }
                Some(BrowseInput::Page(page)) => {
                    orchestrator.set_page(page);
                    render(&orchestrator.view());
                }
                None => {
                    debug!("Input closed, draining pending work");
                    inputs_open = false;
                    // Closing the debouncer flushes any pending search
                    debouncer = None;
                }
            },
            text = settled.recv(), if settled_open => match text {
                Some(text) => {
                    if let Some(request) = orchestrator.settle_search(text) {
                        in_flight += 1;
                        spawn_fetch(request, &responses_tx);
                    }
                }
                None => settled_open = false,
            },
            Some(response) = responses.recv(), if in_flight > 0 => {
                in_flight -= 1;
                if orchestrator.apply(response) {
                    render(&orchestrator.view());
                }
            }
        }
    }

    orchestrator
}
