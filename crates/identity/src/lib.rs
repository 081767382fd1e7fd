//! Identity client for signing users up and in.
//!
//! This crate provides a Rust client for a GoTrue-compatible auth service.
//! It handles:
//! - Validating sign-up forms before anything is sent
//! - Sign-up and password sign-in over HTTP
//! - Mapping provider errors to localized user-facing messages

pub mod auth;
pub mod client;
pub mod error;
pub mod messages;
pub mod validation;

pub use auth::{sign_in, sign_up, AuthFeedback};
pub use client::{AuthUser, GoTrueClient, IdentityProvider, Session};
pub use error::{IdentityError, Result, ValidationError};
pub use validation::{
    validate_email, validate_name, validate_password, validate_sign_up, SignInForm, SignUpForm,
};
