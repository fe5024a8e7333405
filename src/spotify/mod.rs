//! # Spotify Module
//!
//! Thin client for the two Spotify endpoints the bot talks to:
//!
//! - [`auth`] - OAuth 2.0 client-credentials exchange against the accounts
//!   service, producing short-lived bearer tokens
//! - [`tracks`] - the "get track" Web API call, authenticated with such a token
//!
//! Neither module keeps any state of its own. Token lifetime and the shared
//! client handle are owned by [`crate::management::CredentialManager`].

pub mod auth;
pub mod tracks;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::types::Track;

pub use auth::{ClientCredentials, TokenProvider};
pub use tracks::SpotifyClient;

/// Upper bound for a single Spotify HTTP request, connect to last byte.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared HTTP client for both the accounts service and the Web API.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("token request rejected with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("malformed token response: {0}")]
    Malformed(String),
    #[error("token request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0}")]
    NotFoundOrApi(String),
    #[error("no ISRC is available for track {}", track.name)]
    IsrcUnavailable { track: Box<Track> },
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::NotFoundOrApi(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Pulls the human readable message out of a Spotify error body, falling back
/// to the raw body (or the status line when the body is empty).
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => format!("{} ({})", parsed.error.message, status),
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{} ({})", body.trim(), status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_uses_api_message() {
        let body = r#"{"error":{"status":400,"message":"invalid id"}}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "invalid id (400 Bad Request)"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, ""),
            "404 Not Found"
        );
    }
}
