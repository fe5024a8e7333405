//! # API Module
//!
//! HTTP endpoints of the optional health server.
//!
//! ## Endpoints
//!
//! - [`health`] - reports the crate version and the state of the Spotify
//!   credentials (`active`, or `retrying` with the number of consecutive
//!   renewal failures), including when the current token was obtained and
//!   when it expires
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use isrc_lookup::api::health;
//!
//! let app = Router::new()
//!     .route("/health", get(health::<ClientCredentials>))
//!     .layer(Extension(credentials));
//! ```

mod health;

pub use health::health;
