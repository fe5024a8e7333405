//! # Commands Module
//!
//! Turns one inbound Discord command into exactly one ephemeral [`Reply`].
//!
//! Two commands exist, modelled as the two cases of [`Command`]:
//!
//! - [`LOOKUP_COMMAND`] - slash command with a Spotify track URL
//! - [`ACTIVITY_COMMAND`] - user context command that reads the target's
//!   Spotify listening activity from the presence cache
//!
//! Both end in [`lookup_track`], which makes at most one Spotify API call.
//! Invalid input never reaches the API.
//!
//! The module does not know about the gateway. Track metadata comes through
//! [`TrackLookup`] and presences through [`PresenceSource`]; [`crate::bot`]
//! wires both to the credential manager and serenity's cache.

mod activity;
mod lookup;

use std::future::Future;

use serenity::model::id::{GuildId, UserId};

use crate::{
    management::CredentialManager,
    spotify::{LookupError, TokenProvider},
    types::{Presence, Track},
    utils,
};

pub use activity::{ActivityMatch, find_spotify_track, lookup_activity};
pub use lookup::{lookup_track, lookup_url, resolve_isrc};

pub const LOOKUP_COMMAND: &str = "lookup";
pub const LOOKUP_URL_OPTION: &str = "url";
pub const ACTIVITY_COMMAND: &str = "Lookup ISRC from activities";

pub const LOOKUP_BUTTON_LABEL: &str = "🔎 Lookup on YouTube";

/// Fetches track metadata by Spotify id.
pub trait TrackLookup: Send + Sync {
    fn get_track(&self, track_id: &str)
    -> impl Future<Output = Result<Track, LookupError>> + Send;
}

impl<P: TokenProvider> TrackLookup for CredentialManager<P> {
    async fn get_track(&self, track_id: &str) -> Result<Track, LookupError> {
        let client = self.client().await;
        client.get_track(track_id).await
    }
}

/// Read access to cached presences.
pub trait PresenceSource {
    fn presence(&self, guild_id: GuildId, user_id: UserId) -> Option<Presence>;
}

/// An inbound command with its typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/lookup url:<spotify track url>`
    Lookup { url: String },
    /// User context command on `target`, invoked in `guild_id` (absent in DMs).
    ActivityLookup {
        guild_id: Option<GuildId>,
        target: UserId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

impl LinkButton {
    pub fn youtube_search(isrc: &str) -> Self {
        Self {
            label: LOOKUP_BUTTON_LABEL.to_string(),
            url: utils::youtube_search_url(isrc),
        }
    }
}

/// Reply text plus an optional link button. Always sent ephemeral with
/// mentions suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub button: Option<LinkButton>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            button: None,
        }
    }

    pub fn with_button(mut self, button: LinkButton) -> Self {
        self.button = Some(button);
        self
    }
}

/// Handles one command.
///
/// Never fails: user errors and lookup errors become reply text.
pub async fn dispatch<L, P>(command: Command, lookup: &L, presences: &P) -> Reply
where
    L: TrackLookup,
    P: PresenceSource + ?Sized,
{
    match command {
        Command::Lookup { url } => lookup_url(&url, lookup).await,
        Command::ActivityLookup { guild_id, target } => {
            let presence = guild_id.and_then(|guild_id| presences.presence(guild_id, target));
            lookup_activity(target, presence.as_ref(), lookup).await
        }
    }
}
