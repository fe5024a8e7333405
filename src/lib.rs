//! ISRC Lookup Bot Library
//!
//! This library provides a Discord bot that answers with the ISRC of a Spotify
//! track, either from a track URL passed to a slash command or from the track a
//! user is currently listening to according to their Discord rich presence.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the optional health server
//! - `bot` - Discord gateway client, command registration and interaction glue
//! - `commands` - Command dispatching and the ISRC lookup operation
//! - `config` - Configuration management and environment variables
//! - `management` - Credential lifecycle with background token renewal
//! - `server` - Local HTTP server exposing the health endpoint
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - URL parsing and message formatting helpers
//!
//! # Example
//!
//! ```
//! use isrc_lookup::{bot, config};
//!
//! #[tokio::main]
//! async fn main() -> isrc_lookup::Res<()> {
//!     config::load_env().await?;
//!     bot::run().await
//! }
//! ```

pub mod api;
pub mod bot;
pub mod commands;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the top-level glue (startup, gateway client, CLI) where errors of
/// different origins are only reported, never matched on. Keeps the
/// Send + Sync bounds required across tokio tasks.
///
/// # Example
///
/// ```
/// use isrc_lookup::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting the bot...");
/// info!("Registered {} commands", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Spotify client initialized");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for startup failures the bot cannot recover from, such as missing
/// configuration or a rejected first token exchange. Never use it on the
/// request path or inside the renewal loop.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: failed token renewals, failed interaction
/// responses and similar.
///
/// # Example
///
/// ```
/// warning!("Failed to renew spotify token: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
