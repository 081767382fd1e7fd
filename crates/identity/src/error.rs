//! Error types for the identity crate.

use thiserror::Error;

/// A form field failed its validation rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be 2-8 Hangul, ASCII letters or digits")]
    InvalidName,

    #[error("email must contain '@' and '.'")]
    InvalidEmail,

    #[error("password must be 6+ ASCII letters and digits, with at least one of each")]
    InvalidPassword,

    #[error("password confirmation does not match")]
    PasswordMismatch,
}

/// Errors that can occur when talking to the identity provider
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Rejected locally before any request was made
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Sign-up for an email that already has an account
    #[error("User already registered")]
    AlreadyRegistered,

    /// The provider refused the request
    #[error("Identity provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The HTTP request itself failed
    #[error("Identity request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Invalid response from identity provider: {0}")]
    InvalidResponse(String),

    /// Client was built without the settings it needs
    #[error("Missing identity configuration: {0}")]
    MissingConfig(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, IdentityError>;
