//
//  samplify
//  config/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Options
//!
//! Endpoints and timeout used by a [`SamplifyClient`](crate::api::SamplifyClient).
//! Options are fixed once the client is built.
//!
//! ## Environments
//!
//! | Environment | API base URL | Auth URL |
//! |-------------|--------------|----------|
//! | `uat` | `https://api.uat.pe.researchnow.com/sample/v1` | `https://api.uat.pe.researchnow.com/auth/v1/token/password` |
//! | `production` | `https://api.researchnow.com/sample/v1` | `https://api.researchnow.com/auth/v1/token/password` |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use samplify::config::{ClientOptions, Environment};
//!
//! let options = ClientOptions::for_environment(Environment::Production)
//!     .with_timeout(Duration::from_secs(10));
//!
//! assert_eq!(options.api_base_url, "https://api.researchnow.com/sample/v1");
//! assert_eq!(options.timeout, Duration::from_secs(10));
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout applied to both the auth call and resource calls by default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Samplify deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// User acceptance testing sandbox.
    #[default]
    Uat,
    /// Live environment; calls here cost money.
    Production,
}

impl Environment {
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Self::Uat => "https://api.uat.pe.researchnow.com/sample/v1",
            Self::Production => "https://api.researchnow.com/sample/v1",
        }
    }

    pub fn auth_url(&self) -> &'static str {
        match self {
            Self::Uat => "https://api.uat.pe.researchnow.com/auth/v1/token/password",
            Self::Production => "https://api.researchnow.com/auth/v1/token/password",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uat => "uat",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uat" | "sandbox" => Ok(Self::Uat),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{}' (expected uat or production)", other)),
        }
    }
}

/// Endpoint and timeout configuration for a client.
///
/// Base URLs are stored without a trailing `/` so that resource paths,
/// which always start with `/`, can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Base URL every resource path is appended to.
    pub api_base_url: String,

    /// Full URL of the token endpoint.
    pub auth_url: String,

    /// Per-request timeout for auth and resource calls.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ClientOptions {
    /// Creates options pointing at the given deployment.
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            api_base_url: environment.api_base_url().to_string(),
            auth_url: environment.auth_url().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the API base URL. A trailing `/` is removed.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_trailing_slash(url.into());
        self
    }

    /// Overrides the token endpoint URL. A trailing `/` is removed.
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = trim_trailing_slash(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins the base URL, a resource path and an optional query suffix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use samplify::config::ClientOptions;
    ///
    /// let options = ClientOptions::default().with_api_base_url("http://localhost:8080/");
    /// assert_eq!(options.url("/countries", ""), "http://localhost:8080/countries");
    /// assert_eq!(
    ///     options.url("/countries", "sort=name:asc"),
    ///     "http://localhost:8080/countries?sort=name:asc"
    /// );
    /// ```
    pub fn url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}{}?{}", self.api_base_url, path, query)
        }
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uat() {
        let options = ClientOptions::default();
        assert_eq!(options.api_base_url, Environment::Uat.api_base_url());
        assert_eq!(options.auth_url, Environment::Uat.auth_url());
        assert_eq!(options.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let options = ClientOptions::default()
            .with_api_base_url("http://127.0.0.1:1234//")
            .with_auth_url("http://127.0.0.1:1234/auth/");
        assert_eq!(options.api_base_url, "http://127.0.0.1:1234");
        assert_eq!(options.auth_url, "http://127.0.0.1:1234/auth");
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("UAT".parse::<Environment>().unwrap(), Environment::Uat);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
