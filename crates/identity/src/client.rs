//! Identity provider client.
//!
//! Talks to a GoTrue-compatible auth API (the one Supabase exposes under
//! `/auth/v1`). Provides:
//! - Sign-up with a display name stored as user metadata
//! - Password sign-in returning a [`Session`]
//! - Mapping of provider error bodies into [`IdentityError`]

use crate::error::{IdentityError, Result};
use crate::validation::{validate_sign_up, SignInForm, SignUpForm};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

/// Provider message for an email that already has an account
const ALREADY_REGISTERED_MESSAGE: &str = "User already registered";

/// Anything that can register and authenticate users.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account. The form is validated before any request.
    async fn sign_up(&self, form: &SignUpForm) -> Result<AuthUser>;

    /// Exchange email and password for a session.
    async fn sign_in(&self, form: &SignInForm) -> Result<Session>;
}

/// Account as reported by the provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    /// Display name saved at sign-up, if any
    pub fn name(&self) -> Option<&str> {
        self.user_metadata.get("name").and_then(Value::as_str)
    }
}

/// Signed-in session.
///
/// Passed explicitly to whatever needs to know who is signed in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Client for a GoTrue-compatible auth API.
pub struct GoTrueClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl GoTrueClient {
    /// Create a client for the project at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Project URL, e.g. `https://xyz.supabase.co`
    /// * `anon_key` - Public API key sent with every request
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let anon_key = anon_key.into();
        if base_url.trim().is_empty() {
            return Err(IdentityError::MissingConfig("identity URL".into()));
        }
        if anon_key.trim().is_empty() {
            return Err(IdentityError::MissingConfig("identity API key".into()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/auth/v1/{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = error_message(&text);
            error!("Identity provider rejected {}: {} {}", path, status, message);
            return Err(IdentityError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| IdentityError::InvalidResponse(e.to_string()))
    }
}

/// Pull the human-readable message out of an error body.
///
/// GoTrue versions disagree on the field name, so try each in turn and fall
/// back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_up(&self, form: &SignUpForm) -> Result<AuthUser> {
        validate_sign_up(form)?;
        debug!("Signing up {}", form.email);

        let body = serde_json::json!({
            "email": form.email,
            "password": form.password,
            "data": { "name": form.name },
        });

        let json = self.post("signup", body).await.map_err(|e| match e {
            IdentityError::Provider { ref message, .. } if message == ALREADY_REGISTERED_MESSAGE => {
                IdentityError::AlreadyRegistered
            }
            other => other,
        })?;

        // With autoconfirm on, the user comes back wrapped in a session
        let user_json = json.get("user").cloned().unwrap_or(json);
        let user: AuthUser = serde_json::from_value(user_json)
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;
        info!("Signed up user {}", user.id);
        Ok(user)
    }

    async fn sign_in(&self, form: &SignInForm) -> Result<Session> {
        debug!("Signing in {}", form.email);
        let body = serde_json::json!({
            "email": form.email,
            "password": form.password,
        });

        let json = self.post("token?grant_type=password", body).await?;
        let session: Session = serde_json::from_value(json)
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;
        info!("Signed in user {}", session.user.id);
        Ok(session)
    }
}
