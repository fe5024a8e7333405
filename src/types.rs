use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer token obtained through the client-credentials grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    pub fn expires_at(&self) -> u64 {
        self.obtained_at + self.expires_in
    }
}

/// Raw body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

impl TokenResponse {
    pub fn into_token(self, obtained_at: u64) -> Token {
        Token {
            access_token: self.access_token,
            token_type: self.token_type,
            expires_in: self.expires_in,
            obtained_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub external_ids: HashMap<String, String>,
}

impl Track {
    pub fn isrc(&self) -> Option<&str> {
        self.external_ids
            .get("isrc")
            .map(String::as_str)
            .filter(|isrc| !isrc.is_empty())
    }

    pub fn artist_names(&self) -> Vec<&str> {
        self.artists.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Kind of a rich-presence activity, mirroring Discord's activity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Custom,
    Competing,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Activity {
    pub name: String,
    pub kind: ActivityKind,
    /// Catalog track id for Spotify activities, `None` for local files.
    pub sync_id: Option<String>,
}

impl Activity {
    pub fn is_spotify(&self) -> bool {
        self.kind == ActivityKind::Listening && self.name == "Spotify"
    }
}

/// Snapshot of a user's presence as seen in the gateway cache.
#[derive(Debug, Clone, Default)]
pub struct Presence {
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CredentialState {
    Active,
    Retrying { failures: u32 },
}

/// Point-in-time view of the credential lifecycle, served by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialStatus {
    #[serde(flatten)]
    pub state: CredentialState,
    pub renewed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
