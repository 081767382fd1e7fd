//! Error types for the catalog crate.
//!
//! Every failure talking to the catalog provider ends up here. Callers in
//! the browse flow log these and fall back to an empty result set.

use thiserror::Error;

/// Errors that can occur while fetching or decoding catalog listings
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout)
    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status
    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body did not match the expected listing shape
    #[error("Malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field carried a value we cannot interpret
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Client was built without the credentials it needs
    #[error("Missing catalog configuration: {0}")]
    MissingConfig(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
