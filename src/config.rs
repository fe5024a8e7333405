//! Configuration management for the ISRC lookup bot.
//!
//! Configuration comes from environment variables, optionally seeded from
//! `.env` files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

pub const DISCORD_TOKEN_VAR: &str = "ISRC_LOOKUP_TOKEN";
pub const CLIENT_ID_VAR: &str = "ISRC_LOOKUP_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "ISRC_LOOKUP_CLIENT_SECRET";

const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Loads environment variables from `.env` files.
///
/// The file in the platform-specific local data directory is tried first:
/// - Linux: `~/.local/share/isrc-lookup/.env`
/// - macOS: `~/Library/Application Support/isrc-lookup/.env`
/// - Windows: `%LOCALAPPDATA%/isrc-lookup/.env`
///
/// Afterwards a `.env` in the working directory is loaded. Variables that are
/// already set are never overwritten, and missing files are not an error since
/// the bot is usually configured through the real environment in deployments.
///
/// # Errors
///
/// Returns an error if a `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("isrc-lookup/.env");

    if async_fs::metadata(&path).await.is_ok() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the Discord bot token from `ISRC_LOOKUP_TOKEN`.
pub fn discord_token() -> Result<String, ConfigError> {
    required(DISCORD_TOKEN_VAR)
}

/// Returns the Spotify application client ID from `ISRC_LOOKUP_CLIENT_ID`.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required(CLIENT_ID_VAR)
}

/// Returns the Spotify application client secret from `ISRC_LOOKUP_CLIENT_SECRET`.
///
/// The secret should never end up in logs or replies.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required(CLIENT_SECRET_VAR)
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, defaulting to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    with_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the bind address of the optional health server.
///
/// `None` when `SERVER_ADDRESS` is unset, which disables the server.
pub fn server_addr() -> Option<String> {
    env::var("SERVER_ADDRESS")
        .ok()
        .filter(|value| !value.trim().is_empty())
}
