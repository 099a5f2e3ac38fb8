//
//  samplify
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Samplify API
//!
//! [`SamplifyClient`] holds the credentials, the endpoint options and the
//! token manager for one API account. Every resource method funnels through
//! [`SamplifyClient::execute`], which:
//!
//! 1. obtains a valid token (authenticating first if needed) and stops with
//!    the authentication error if that fails,
//! 2. builds `api_base_url + path + ?query`,
//! 3. attaches `Authorization: Bearer <token>`, `Content-Type`, `Accept`
//!    and the user agent,
//! 4. serializes the body, if any,
//! 5. sends the request under the configured timeout,
//! 6. decodes a success body into the requested type,
//! 7. maps an error body to [`SamplifyError::Api`], falling back to
//!    [`SamplifyError::UnexpectedResponse`].
//!
//! Nothing is retried or cached.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::{error_from_response, SamplifyError};
use crate::auth::{AccessToken, Credentials, TokenManager};
use crate::config::ClientOptions;

/// Client for one Samplify account.
///
/// Cheap to share behind an `Arc`; all methods take `&self` and may run
/// concurrently.
///
/// # Example
///
/// ```rust,no_run
/// use samplify::{ClientOptions, Credentials, SamplifyClient};
///
/// # async fn example() -> Result<(), samplify::SamplifyError> {
/// let client = SamplifyClient::new(
///     Credentials::new("client-id", "client-secret"),
///     ClientOptions::default(),
/// )?;
///
/// let countries = client.get_countries(None).await?;
/// for country in countries.data {
///     println!("{} {}", country.iso_code, country.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SamplifyClient {
    http: Client,
    options: ClientOptions,
    credentials: Credentials,
    tokens: TokenManager,
}

impl SamplifyClient {
    /// Creates a client. No network call happens until the first request.
    ///
    /// # Errors
    ///
    /// Returns [`SamplifyError::Network`] if the HTTP client cannot be built
    /// (for example, when the TLS backend fails to initialize).
    pub fn new(credentials: Credentials, options: ClientOptions) -> Result<Self, SamplifyError> {
        let http = Client::builder()
            .user_agent(credentials.user_agent())
            .timeout(options.timeout)
            .build()?;

        let tokens = TokenManager::new(http.clone(), options.auth_url.clone(), credentials.clone());

        Ok(Self {
            http,
            options,
            credentials,
            tokens,
        })
    }

    /// Seeds the client with a previously issued token.
    ///
    /// The token is used for as long as it stays valid; afterwards the client
    /// re-authenticates with its credentials as usual.
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.tokens.seed(token);
        self
    }

    /// Returns the token currently held, if any, without refreshing it.
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.tokens.current().await
    }

    /// Forces a fresh authentication call and returns the new token.
    pub async fn authenticate(&self) -> Result<AccessToken, SamplifyError> {
        self.tokens.refresh().await
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Executes one authenticated request and decodes the response.
    ///
    /// # Parameters
    ///
    /// - `method`: HTTP verb.
    /// - `path`: Resource path starting with `/`.
    /// - `query`: Rendered query string without `?`; empty for none.
    /// - `body`: Request payload, serialized as JSON when present.
    ///
    /// # Returns
    ///
    /// The decoded success body, or exactly one [`SamplifyError`].
    pub async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<&B>,
    ) -> Result<T, SamplifyError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.tokens.valid_token().await?;
        let headers = self.default_headers(&token)?;
        let url = self.options.url(path, query);

        tracing::debug!("{} {}", method, path);

        let mut request = self.http.request(method, &url).headers(headers);

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(SamplifyError::Encode)?;
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::trace!("{} responded with {}", path, status);

        let text = response.text().await?;

        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(|source| SamplifyError::Decode {
            status: status.as_u16(),
            source,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: &str) -> Result<T, SamplifyError> {
        self.execute::<T, ()>(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, SamplifyError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, "", body).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, SamplifyError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, "", Some(body)).await
    }

    fn default_headers(&self, token: &AccessToken) -> Result<HeaderMap, SamplifyError> {
        let mut authorization =
            HeaderValue::from_str(&token.bearer()).map_err(|_| SamplifyError::InvalidToken {
                reason: "access token contains characters not allowed in an HTTP header".to_string(),
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);
        Ok(headers)
    }
}

impl std::fmt::Debug for SamplifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplifyClient")
            .field("options", &self.options)
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn client_for(server: &mockito::Server) -> SamplifyClient {
        let options = ClientOptions::default()
            .with_api_base_url(server.url())
            .with_auth_url(format!("{}/auth", server.url()));
        SamplifyClient::new(Credentials::new("id", "secret"), options)
            .unwrap()
            .with_access_token(AccessToken::new("test-token", Utc::now(), 1800))
    }

    #[tokio::test]
    async fn test_execute_sends_standard_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/countries")
            .match_header("authorization", "Bearer test-token")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_header("user-agent", mockito::Matcher::Regex("^samplify-rs/".to_string()))
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let body: serde_json::Value = client.get("/countries", "").await.unwrap();

        assert_eq!(body["ok"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unsendable_token_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let resource = server.mock("GET", "/countries").expect(0).create_async().await;

        let options = ClientOptions::default()
            .with_api_base_url(server.url())
            .with_auth_url(format!("{}/auth", server.url()));
        let client = SamplifyClient::new(Credentials::new("id", "secret"), options)
            .unwrap()
            .with_access_token(AccessToken::new("bad\ntoken", Utc::now(), 1800));

        let err = client.get::<serde_json::Value>("/countries", "").await.unwrap_err();

        assert!(matches!(err, SamplifyError::InvalidToken { .. }));
        assert_eq!(err.kind(), crate::api::common::ErrorKind::Authentication);
        resource.assert_async().await;
    }

    #[tokio::test]
    async fn test_decode_failure_on_success_is_transport_class() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/countries")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get::<serde_json::Value>("/countries", "").await.unwrap_err();

        assert!(matches!(err, SamplifyError::Decode { status: 200, .. }));
        assert_eq!(err.kind(), crate::api::common::ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_auth_failure_skips_resource_call() {
        let mut server = mockito::Server::new_async().await;
        let _auth = server
            .mock("POST", "/auth")
            .with_status(401)
            .with_body("")
            .create_async()
            .await;
        let resource = server.mock("GET", "/countries").expect(0).create_async().await;

        let options = ClientOptions::default()
            .with_api_base_url(server.url())
            .with_auth_url(format!("{}/auth", server.url()));
        let client = SamplifyClient::new(Credentials::new("id", "secret"), options)
            .unwrap()
            .with_access_token(AccessToken::new("old", Utc::now() - Duration::hours(1), 60));

        let err = client.get::<serde_json::Value>("/countries", "").await.unwrap_err();
        match err {
            SamplifyError::AuthRejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("expected auth error, got {other:?}"),
        }
        assert_eq!(client.access_token().await.unwrap().access_token, "old");
        resource.assert_async().await;
    }
}
