//! Core domain types for catalog listings.
//!
//! The catalog speaks TMDB's JSON shape, so `MovieRecord` deserializes
//! straight from a listing's `results` array. Everything else in the
//! workspace works on these records without caring where they came from.

use crate::error::{CatalogError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie in the catalog
pub type MovieId = u64;

/// Default image base used to turn a poster path into a URL
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

// =============================================================================
// Movie Records
// =============================================================================

/// One catalog entry.
///
/// Records are immutable once fetched; a new fetch replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Path relative to the image base, e.g. `/abc123.jpg`
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average vote, 0 to 10
    #[serde(rename = "vote_average", default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    /// `None` when the catalog sends a missing or unparseable date
    #[serde(default, deserialize_with = "deserialize_release_date")]
    pub release_date: Option<NaiveDate>,
}

impl MovieRecord {
    /// Full poster URL under `image_base`, if the record has a poster.
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", image_base.trim_end_matches('/'), path))
    }

    /// Release year, when known
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Release dates that are empty, partial (`"2020"`) or not strings at all
/// become `None`; one odd record must not fail the whole listing.
fn deserialize_release_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    let date = match raw {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
            match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(e) => {
                    tracing::debug!("Ignoring unparseable release date {:?}: {}", s, e);
                    None
                }
            }
        }
        _ => None,
    };
    Ok(date)
}

// =============================================================================
// Sort Mode
// =============================================================================

/// Ordering key chosen by the user.
///
/// Every real mode sorts descending. `Unsorted` keeps catalog order and is
/// what unknown mode names fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Highest average vote first
    #[serde(rename = "vote")]
    Rating,
    /// Most recent release first
    #[serde(rename = "recent")]
    Recency,
    /// Highest popularity first
    #[serde(rename = "popular")]
    Popularity,
    #[default]
    Unsorted,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Rating, SortMode::Recency, SortMode::Popularity];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Rating => "vote",
            SortMode::Recency => "recent",
            SortMode::Popularity => "popular",
            SortMode::Unsorted => "unsorted",
        }
    }

    /// Parse a mode name, treating anything unrecognized as `Unsorted`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(SortMode::Unsorted)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vote" | "rating" => Ok(SortMode::Rating),
            "recent" | "recency" => Ok(SortMode::Recency),
            "popular" | "popularity" => Ok(SortMode::Popularity),
            "unsorted" | "none" => Ok(SortMode::Unsorted),
            _ => Err(CatalogError::InvalidValue {
                field: "sort_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Listing Requests and Responses
// =============================================================================

/// Which listing to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The "popular" browse listing
    Popular,
    /// Free-text title search
    Search(String),
}

impl Listing {
    /// Empty or whitespace-only queries browse instead of searching.
    pub fn from_query(query: &str) -> Self {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            Listing::Popular
        } else {
            Listing::Search(trimmed.to_string())
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Listing::Search(_))
    }
}

/// One page of a catalog listing, as returned on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieRecord>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}
