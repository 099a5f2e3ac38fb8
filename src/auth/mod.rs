//
//  samplify
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Samplify uses the OAuth 2.0 client-credentials grant: the client ID and
//! secret are exchanged at the auth endpoint for a short-lived bearer token,
//! which is attached to every resource request.
//!
//! ## Module Structure
//!
//! - [`token`]: The [`TokenManager`] that owns the held token and refreshes it
//! - [`keyring`]: Secure storage of the client secret for the CLI
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use samplify::auth::{AccessToken, Credentials};
//!
//! let credentials = Credentials::new("my-client-id", "my-client-secret");
//! assert_eq!(credentials.client_id(), "my-client-id");
//!
//! let token = AccessToken::new("abc", Utc::now() - Duration::hours(1), 1800);
//! assert!(!token.is_valid());
//! ```

mod keyring;
mod token;

pub use self::keyring::*;
pub use self::token::*;

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds before the literal expiry instant at which a token is treated as expired.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 10;

/// Grant type sent in every authentication request.
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Returns the default `User-Agent` sent by the client.
pub fn default_user_agent() -> String {
    format!("samplify-rs/{}", crate::VERSION)
}

/// Client credentials issued by Samplify.
///
/// Immutable once handed to a client. The secret is never printed by the
/// `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    user_agent: String,
}

impl Credentials {
    /// Creates credentials with the default user agent.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            user_agent: default_user_agent(),
        }
    }

    /// Replaces the user agent sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret_set", &!self.client_secret.is_empty())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// An access token together with its validity window.
///
/// A token is valid while `now < acquired_at + expires_in`, less
/// [`TOKEN_EXPIRY_MARGIN_SECS`]. Tokens are replaced as a whole value and
/// never modified field by field.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token value.
    pub access_token: String,

    /// When the token response was received.
    pub acquired_at: DateTime<Utc>,

    /// Lifetime of the token in seconds, counted from `acquired_at`.
    pub expires_in: i64,

    /// Refresh token issued alongside the access token, if any.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime of the refresh token in seconds, if reported.
    #[serde(default)]
    pub refresh_token_expires_in: Option<i64>,
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>, acquired_at: DateTime<Utc>, expires_in: i64) -> Self {
        Self {
            access_token: access_token.into(),
            acquired_at,
            expires_in,
            refresh_token: None,
            refresh_token_expires_in: None,
        }
    }

    /// The literal instant the token stops being accepted.
    ///
    /// `None` when `expires_in` does not fit the calendar range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Duration::try_seconds(self.expires_in).and_then(|lifetime| self.acquired_at.checked_add_signed(lifetime))
    }

    /// Checks validity at `now`, applying the expiry margin.
    ///
    /// A token without a representable expiry is never valid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at()
            .and_then(|expiry| expiry.checked_sub_signed(Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS)))
            .is_some_and(|deadline| now < deadline)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Returns the `Authorization` header value for this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &mask(&self.access_token))
            .field("acquired_at", &self.acquired_at)
            .field("expires_in", &self.expires_in)
            .field("refresh_token_set", &self.refresh_token.is_some())
            .finish()
    }
}

/// Masks a secret for display, keeping the first four characters.
pub fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
