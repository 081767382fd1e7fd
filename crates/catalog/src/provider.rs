//! Catalog provider abstraction and the TMDB HTTP client.
//!
//! The browse flow only depends on [`CatalogProvider`]; the TMDB client is
//! the production implementation and tests swap in in-memory providers.

use crate::error::{CatalogError, Result};
use crate::types::{Listing, ListingPage, MovieId, MovieRecord};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info};

/// Source of movie listings.
///
/// `Send + Sync` so one provider can be shared by the orchestrator and any
/// in-flight fetch tasks.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the name of this provider (for logging)
    fn name(&self) -> &str;

    /// Fetch every record for `listing`, in catalog order.
    async fn fetch(&self, listing: &Listing) -> Result<Vec<MovieRecord>>;
}

/// Settings for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API root, e.g. `https://api.themoviedb.org/3`
    pub api_base: String,
    /// v4 read access token, sent as a bearer token
    pub token: String,
    pub language: String,
    /// How many pages make up the popular listing (20 records per page)
    pub popular_pages: u32,
    /// Upper bound on pages fetched for one search
    pub search_pages: u32,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.themoviedb.org/3".to_string(),
            token: String::new(),
            language: "ko-KR".to_string(),
            popular_pages: 6,
            search_pages: 1,
        }
    }
}

/// HTTP client for a TMDB-compatible catalog.
pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Create a client with its own connection pool.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: TmdbConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(CatalogError::MissingConfig("TMDB token".to_string()));
        }
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Fetch a single listing page.
    pub async fn fetch_page(&self, listing: &Listing, page: u32) -> Result<ListingPage> {
        let page_param = page.to_string();
        let base = self.config.api_base.trim_end_matches('/');
        let request = match listing {
            Listing::Popular => self.client.get(format!("{}/movie/popular", base)).query(&[
                ("language", self.config.language.as_str()),
                ("page", page_param.as_str()),
            ]),
            Listing::Search(query) => self.client.get(format!("{}/search/movie", base)).query(&[
                ("query", query.as_str()),
                ("language", self.config.language.as_str()),
                ("page", page_param.as_str()),
            ]),
        };

        let response = request
            .bearer_auth(&self.config.token)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn page_limit(&self, listing: &Listing) -> u32 {
        match listing {
            Listing::Popular => self.config.popular_pages,
            Listing::Search(_) => self.config.search_pages,
        }
        .max(1)
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    /// Walks pages `1..=limit`, stopping early at the listing's last page.
    /// Records that reappear on a later page are dropped so ids stay unique.
    async fn fetch(&self, listing: &Listing) -> Result<Vec<MovieRecord>> {
        let limit = self.page_limit(listing);
        let mut seen: HashSet<MovieId> = HashSet::new();
        let mut records = Vec::new();

        for page in 1..=limit {
            let listing_page = self.fetch_page(listing, page).await?;
            let fetched = listing_page.results.len();
            records.extend(
                listing_page
                    .results
                    .into_iter()
                    .filter(|record| seen.insert(record.id)),
            );
            debug!(
                "Fetched page {} of {:?} ({} records, {} kept so far)",
                page,
                listing,
                fetched,
                records.len()
            );

            if listing_page.total_pages <= page {
                break;
            }
        }

        info!("Fetched {} records for {:?}", records.len(), listing);
        Ok(records)
    }
}

/// Fixed in-memory catalog, handy for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    popular: Vec<MovieRecord>,
}

impl StaticCatalog {
    pub fn new(popular: Vec<MovieRecord>) -> Self {
        Self { popular }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    fn name(&self) -> &str {
        "static"
    }

    /// Search is a case-insensitive title substring match.
    async fn fetch(&self, listing: &Listing) -> Result<Vec<MovieRecord>> {
        Ok(match listing {
            Listing::Popular => self.popular.clone(),
            Listing::Search(query) => {
                let needle = query.to_lowercase();
                self.popular
                    .iter()
                    .filter(|record| record.title.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        })
    }
}
