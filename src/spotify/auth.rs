use std::{fmt, future::Future};

use chrono::Utc;
use reqwest::Client;

use crate::{
    config::{self, ConfigError},
    spotify::{AuthError, error_message},
    types::{Token, TokenResponse},
};

/// Source of fresh bearer tokens.
///
/// Implemented by [`ClientCredentials`] for the real accounts service; tests
/// plug in their own providers to drive the renewal loop without network.
pub trait TokenProvider: Send + Sync + 'static {
    fn request_token(&self) -> impl Future<Output = Result<Token, AuthError>> + Send;
}

/// Client-credentials grant configuration for one Spotify application.
#[derive(Clone)]
pub struct ClientCredentials {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl ClientCredentials {
    pub fn new(
        http: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Builds the grant from `ISRC_LOOKUP_CLIENT_ID`, `ISRC_LOOKUP_CLIENT_SECRET`
    /// and the configured token URL.
    pub fn from_env(http: Client) -> Result<Self, ConfigError> {
        Ok(Self::new(
            http,
            config::spotify_apitoken_url(),
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
        ))
    }
}

impl TokenProvider for ClientCredentials {
    async fn request_token(&self) -> Result<Token, AuthError> {
        request_token(
            &self.http,
            &self.token_url,
            &self.client_id,
            &self.client_secret,
        )
        .await
    }
}

/// Performs a single client-credentials exchange.
///
/// Sends `grant_type=client_credentials` with the application credentials as
/// HTTP basic auth and returns the resulting token stamped with the time it
/// was obtained.
///
/// # Errors
///
/// - [`AuthError::Request`] on network failures
/// - [`AuthError::Rejected`] for any non-success status, e.g. invalid credentials
/// - [`AuthError::Malformed`] when the body is not a token response
pub async fn request_token(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<Token, AuthError> {
    let res = http
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(AuthError::Rejected {
            status,
            body: error_message(status, &body),
        });
    }

    let response: TokenResponse =
        serde_json::from_str(&body).map_err(|e| AuthError::Malformed(e.to_string()))?;
    if response.access_token.is_empty() {
        return Err(AuthError::Malformed("empty access token".to_string()));
    }

    Ok(response.into_token(Utc::now().timestamp() as u64))
}
