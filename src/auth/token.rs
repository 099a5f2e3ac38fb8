//
//  samplify
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Lifecycle
//!
//! The [`TokenManager`] owns the access token a client currently holds and
//! decides when to re-authenticate.
//!
//! ## Refresh Rules
//!
//! - No token held, or the held token is past its validity window: POST the
//!   client credentials to the auth URL and store the issued token.
//! - Held token still valid: return it without any network call.
//! - Authentication fails: return the error and keep whatever was held
//!   before (a stale token stays in place, an empty slot stays empty).
//!
//! ## Concurrency
//!
//! The held token lives behind a `tokio::sync::Mutex` that stays locked for
//! the whole check-and-refresh, so concurrent callers that observe an expired
//! token wait for the single in-flight refresh and then share its result.
//! The new token is assigned in one step after the auth response has been
//! fully decoded; dropping a caller mid-refresh leaves the previous value.

use chrono::Utc;
use reqwest::header::HeaderValue;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{AccessToken, Credentials, CLIENT_CREDENTIALS_GRANT};
use crate::api::common::SamplifyError;

/// Body of the client-credentials authentication request.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

/// Body returned by the auth endpoint on success.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    refresh_token_expires_in: Option<i64>,
}

/// Owns the access token for one client instance.
///
/// # Example
///
/// ```rust,no_run
/// use samplify::auth::{Credentials, TokenManager};
///
/// # async fn example() -> Result<(), samplify::SamplifyError> {
/// let manager = TokenManager::new(
///     reqwest::Client::new(),
///     "https://api.uat.pe.researchnow.com/auth/v1/token/password",
///     Credentials::new("client-id", "client-secret"),
/// );
///
/// let token = manager.valid_token().await?;
/// println!("token expires at {:?}", token.expires_at());
/// # Ok(())
/// # }
/// ```
pub struct TokenManager {
    http: Client,
    auth_url: String,
    credentials: Credentials,
    held: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(http: Client, auth_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http,
            auth_url: auth_url.into(),
            credentials,
            held: Mutex::new(None),
        }
    }

    /// Returns a token that is valid now, authenticating first if needed.
    ///
    /// # Errors
    ///
    /// Returns an authentication-class [`SamplifyError`] when the auth call
    /// fails; the held token is left as it was.
    pub async fn valid_token(&self) -> Result<AccessToken, SamplifyError> {
        let mut held = self.held.lock().await;

        if let Some(token) = held.as_ref() {
            if token.is_valid_at(Utc::now()) {
                return Ok(token.clone());
            }
            tracing::debug!("Access token expired at {:?}, re-authenticating", token.expires_at());
        }

        let fresh = self.request_token().await?;
        *held = Some(fresh.clone());
        Ok(fresh)
    }

    /// Authenticates unconditionally and replaces the held token.
    pub async fn refresh(&self) -> Result<AccessToken, SamplifyError> {
        let mut held = self.held.lock().await;
        let fresh = self.request_token().await?;
        *held = Some(fresh.clone());
        Ok(fresh)
    }

    /// Returns a copy of the held token, valid or not.
    pub async fn current(&self) -> Option<AccessToken> {
        self.held.lock().await.clone()
    }

    /// Installs a token before the manager is shared. Needs no lock.
    pub fn seed(&mut self, token: AccessToken) {
        *self.held.get_mut() = Some(token);
    }

    /// Performs one authentication call. Does not touch the held token.
    async fn request_token(&self) -> Result<AccessToken, SamplifyError> {
        tracing::debug!("Authenticating client {} at {}", self.credentials.client_id(), self.auth_url);

        let payload = TokenRequest {
            client_id: self.credentials.client_id(),
            client_secret: self.credentials.client_secret(),
            grant_type: CLIENT_CREDENTIALS_GRANT,
        };

        let response = self
            .http
            .post(&self.auth_url)
            .json(&payload)
            .send()
            .await
            .map_err(SamplifyError::AuthTransport)?;

        let status = response.status();
        let body = response.text().await.map_err(SamplifyError::AuthTransport)?;
        let received_at = Utc::now();

        if !status.is_success() {
            tracing::debug!("Authentication rejected with status {}", status);
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("no response body").to_string()
            } else {
                body
            };
            return Err(SamplifyError::AuthRejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(SamplifyError::AuthDecode)?;

        let token = AccessToken {
            access_token: parsed.access_token,
            acquired_at: received_at,
            expires_in: parsed.expires_in,
            refresh_token: parsed.refresh_token,
            refresh_token_expires_in: parsed.refresh_token_expires_in,
        };

        HeaderValue::from_str(&token.bearer()).map_err(|_| SamplifyError::InvalidToken {
            reason: "access token contains characters not allowed in an HTTP header".to_string(),
        })?;
        if token.expires_at().is_none() {
            return Err(SamplifyError::InvalidToken {
                reason: format!("expiresIn {} is out of range", token.expires_in),
            });
        }

        tracing::debug!("Authenticated; token valid for {}s", token.expires_in);
        Ok(token)
    }
}
