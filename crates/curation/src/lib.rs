//! Client-side curation of a fetched movie collection.
//!
//! This crate provides:
//! - Stable, descending sorts for each `SortMode`
//! - Page slicing with no overlaps or gaps between pages
//! - The carousel (top of the sorted order) and the pager window
//!
//! ## Architecture
//! Curation runs after every fetch and every user interaction:
//! 1. Sort the active result set by the chosen mode
//! 2. Slice out the requested page for the grid
//! 3. Take the top few for the carousel (browse view only)
//!
//! ## Example Usage
//! ```ignore
//! use curation::{curate, Curator};
//! use catalog::SortMode;
//!
//! let grid = curate(&records, SortMode::Rating, 1, 20);
//!
//! let curator = Curator::new();
//! let top = curator.carousel(&records, SortMode::Popularity);
//! ```

pub mod curator;
pub mod pager;

// Re-export main types
pub use curator::{
    DEFAULT_CAROUSEL_SIZE, DEFAULT_PAGE_SIZE, Curator, carousel, curate, page_range, page_slice,
    sort_records,
};
pub use pager::{DEFAULT_PAGER_WIDTH, PageButton, page_count, pager_window};
