//! Browse crate for the ReelBrowse movie browser.
//!
//! This crate contains the orchestrator that coordinates the catalog,
//! search and curation crates for one browsing session, the input loop that
//! drives it, and the configuration shared by front ends.

pub mod config;
pub mod driver;
pub mod orchestrator;

pub use config::{BrowseConfig, Theme};
pub use driver::{BrowseInput, run_browse_loop};
pub use orchestrator::{BrowseOrchestrator, BrowseView, FetchRequest, FetchResponse};
