//! # Catalog Crate
//!
//! Movie records and the providers that fetch them.
//!
//! ## Main Components
//!
//! - **types**: `MovieRecord`, `SortMode`, listing request/response types
//! - **provider**: `CatalogProvider` trait, TMDB HTTP client, static catalog
//! - **error**: Error types for catalog fetches
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogProvider, Listing, TmdbClient, TmdbConfig};
//!
//! let client = TmdbClient::new(TmdbConfig {
//!     token: std::env::var("TMDB_TOKEN")?,
//!     ..TmdbConfig::default()
//! })?;
//!
//! let popular = client.fetch(&Listing::Popular).await?;
//! let found = client.fetch(&Listing::from_query("dune")).await?;
//! ```

// Public modules
pub mod error;
pub mod provider;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use provider::{CatalogProvider, StaticCatalog, TmdbClient, TmdbConfig};
pub use types::{DEFAULT_IMAGE_BASE, Listing, ListingPage, MovieId, MovieRecord, SortMode};
