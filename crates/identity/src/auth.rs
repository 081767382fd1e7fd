//! Sign-up and sign-in flows with user-facing feedback.
//!
//! These wrap an [`IdentityProvider`] call and turn the outcome into the
//! message the form shows, mirroring how errors are presented to users.

use crate::client::{IdentityProvider, Session};
use crate::messages::{SIGN_IN_SUCCESS, SIGN_UP_SUCCESS};
use crate::validation::{SignInForm, SignUpForm};
use tracing::warn;

/// What the form shows after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFeedback {
    Message(String),
    Error(String),
}

impl AuthFeedback {
    pub fn is_error(&self) -> bool {
        matches!(self, AuthFeedback::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            AuthFeedback::Message(text) | AuthFeedback::Error(text) => text,
        }
    }
}

/// Validate and register. Never fails: every error becomes feedback.
pub async fn sign_up<P>(provider: &P, form: &SignUpForm) -> AuthFeedback
where
    P: IdentityProvider + ?Sized,
{
    match provider.sign_up(form).await {
        Ok(_) => AuthFeedback::Message(SIGN_UP_SUCCESS.to_string()),
        Err(e) => {
            warn!("Sign-up failed: {}", e);
            AuthFeedback::Error(e.sign_up_message())
        }
    }
}

/// Authenticate, returning the session on success alongside the feedback.
pub async fn sign_in<P>(provider: &P, form: &SignInForm) -> (AuthFeedback, Option<Session>)
where
    P: IdentityProvider + ?Sized,
{
    match provider.sign_in(form).await {
        Ok(session) => (AuthFeedback::Message(SIGN_IN_SUCCESS.to_string()), Some(session)),
        Err(e) => {
            warn!("Sign-in failed: {}", e);
            (AuthFeedback::Error(e.sign_in_message()), None)
        }
    }
}
