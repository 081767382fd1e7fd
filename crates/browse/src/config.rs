//! Browse configuration loaded from environment variables.
//!
//! | Env Var             | Default                             |
//! |---------------------|-------------------------------------|
//! | `TMDB_API_BASE`     | `https://api.themoviedb.org/3`      |
//! | `TMDB_TOKEN`        | (required for catalog commands)     |
//! | `TMDB_LANGUAGE`     | `ko-KR`                             |
//! | `TMDB_IMAGE_BASE`   | `https://image.tmdb.org/t/p/w500`   |
//! | `POPULAR_PAGES`     | `6`                                 |
//! | `SEARCH_PAGES`      | `1`                                 |
//! | `PAGE_SIZE`         | `20`                                |
//! | `DEBOUNCE_MS`       | `500`                               |
//! | `SUPABASE_URL`      | (required for auth commands)        |
//! | `SUPABASE_ANON_KEY` | (required for auth commands)        |
//! | `REEL_THEME`        | `dark`                              |

use anyhow::{Context, Result, anyhow};
use catalog::{DEFAULT_IMAGE_BASE, TmdbConfig};
use identity::GoTrueClient;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Colour scheme for rendering.
///
/// Passed to renderers explicitly rather than read from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(anyhow!("unknown theme '{}' (expected dark or light)", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

/// Everything the browse flow and its front end need to start.
#[derive(Debug, Clone)]
pub struct BrowseConfig {
    pub tmdb: TmdbConfig,
    /// Prefix joined with poster paths
    pub image_base: String,
    pub page_size: usize,
    pub debounce: Duration,
    pub identity_url: Option<String>,
    pub identity_key: Option<String>,
    pub theme: Theme,
}

impl BrowseConfig {
    /// Load configuration from the process environment with defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = TmdbConfig::default();
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let tmdb = TmdbConfig {
            api_base: text("TMDB_API_BASE", &defaults.api_base),
            token: text("TMDB_TOKEN", ""),
            language: text("TMDB_LANGUAGE", &defaults.language),
            popular_pages: parse_or(&lookup, "POPULAR_PAGES", defaults.popular_pages)?,
            search_pages: parse_or(&lookup, "SEARCH_PAGES", defaults.search_pages)?,
        };

        let page_size: usize = parse_or(&lookup, "PAGE_SIZE", curation::DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(anyhow!("PAGE_SIZE must be at least 1"));
        }

        let debounce_ms: u64 = parse_or(&lookup, "DEBOUNCE_MS", 500)?;

        Ok(Self {
            tmdb,
            image_base: text("TMDB_IMAGE_BASE", DEFAULT_IMAGE_BASE),
            page_size,
            debounce: Duration::from_millis(debounce_ms),
            identity_url: lookup("SUPABASE_URL").filter(|v| !v.trim().is_empty()),
            identity_key: lookup("SUPABASE_ANON_KEY").filter(|v| !v.trim().is_empty()),
            theme: parse_or(&lookup, "REEL_THEME", Theme::Dark)?,
        })
    }

    /// Build the identity client, failing when its settings are absent.
    pub fn identity_client(&self) -> Result<GoTrueClient> {
        let url = self
            .identity_url
            .as_deref()
            .context("SUPABASE_URL is not set")?;
        let key = self
            .identity_key
            .as_deref()
            .context("SUPABASE_ANON_KEY is not set")?;
        GoTrueClient::new(url, key).context("Failed to create identity client")
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} must be valid ({}): {}", key, raw, e)),
    }
}
