use reqwest::{Client, StatusCode};

use crate::{
    spotify::{LookupError, error_message},
    types::{Token, Track},
};

/// Spotify Web API client bound to one bearer token.
///
/// Instances are immutable; a renewed token means a new client. The underlying
/// `reqwest::Client` is shared between generations so connections are reused.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: Token,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, token: Token) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            api_url,
            token,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Fetches a single track by its Spotify id.
    ///
    /// Exactly one request is made; there is no retry. Any transport error,
    /// non-success status (unknown id, invalid id, expired token, rate limit)
    /// or undecodable body is reported as [`LookupError::NotFoundOrApi`].
    ///
    /// # Example
    ///
    /// ```
    /// let track = client.get_track("4uLU6hMCjMI75M1A2tKUQC").await?;
    /// println!("{} has ISRC {:?}", track.name, track.isrc());
    /// ```
    pub async fn get_track(&self, track_id: &str) -> Result<Track, LookupError> {
        let api_url = format!(
            "{uri}/tracks/{id}",
            uri = self.api_url,
            id = track_id
        );

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(&self.token.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFoundOrApi(format!(
                "track {} not found",
                track_id
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::NotFoundOrApi(error_message(status, &body)));
        }

        let track = response.json::<Track>().await?;
        Ok(track)
    }
}
