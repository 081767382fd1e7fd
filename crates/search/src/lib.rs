//! # Search Crate
//!
//! Everything between the search box and the catalog fetch.
//!
//! ## Components
//!
//! ### Debouncer
//! Holds raw input back until typing pauses, then emits only the last
//! value of the burst (default 500ms).
//!
//! ### Request Generation
//! Tags each fetch so a late response for a superseded query is ignored.
//!
//! ### Query State
//! Search text, sort mode and page, plus the search-vs-browse decision.
//!
//! ## Example Usage
//!
//! ```ignore
//! use search::{Debouncer, QueryState, RequestGeneration, DEFAULT_DEBOUNCE};
//!
//! let (debouncer, mut settled) = Debouncer::spawn(DEFAULT_DEBOUNCE);
//! debouncer.push("du".to_string());
//! debouncer.push("dune".to_string());
//!
//! let mut state = QueryState::new();
//! if let Some(text) = settled.recv().await {
//!     state.settle_search(text);
//! }
//! ```

// Public modules
pub mod debounce;
pub mod generation;
pub mod query_state;

// Re-export commonly used types
pub use debounce::{DEFAULT_DEBOUNCE, DebounceState, DebounceTimer, Debouncer};
pub use generation::{RequestGeneration, Ticket};
pub use query_state::QueryState;
