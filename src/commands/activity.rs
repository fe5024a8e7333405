use serenity::model::id::UserId;

use crate::{
    commands::{Reply, TrackLookup, lookup_track},
    types::Presence,
    utils,
};

/// Outcome of scanning a presence for a Spotify listening activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityMatch<'a> {
    NotListening,
    LocalTrack,
    Track(&'a str),
}

/// Finds the first Spotify activity and reads its track id.
///
/// A Spotify activity without a sync id is a local file, which has no
/// catalog entry to look up.
pub fn find_spotify_track(presence: &Presence) -> ActivityMatch<'_> {
    match presence.activities.iter().find(|a| a.is_spotify()) {
        Some(activity) => match activity.sync_id.as_deref() {
            Some(track_id) if !track_id.is_empty() => ActivityMatch::Track(track_id),
            _ => ActivityMatch::LocalTrack,
        },
        None => ActivityMatch::NotListening,
    }
}

/// Handles the activity form of the lookup for `target`.
///
/// `presence` is `None` when the cache has no presence for the user in the
/// guild the command was used in (offline, invisible, or used in a DM).
pub async fn lookup_activity<L: TrackLookup>(
    target: UserId,
    presence: Option<&Presence>,
    lookup: &L,
) -> Reply {
    let user = utils::mention(target.get());
    let Some(presence) = presence else {
        return Reply::text(format!("{} has no presence.", user));
    };

    match find_spotify_track(presence) {
        ActivityMatch::Track(track_id) => lookup_track(track_id, lookup).await,
        ActivityMatch::LocalTrack => {
            Reply::text(format!("{} is listening to a local track.", user))
        }
        ActivityMatch::NotListening => {
            Reply::text(format!("{} isn't listening to Spotify.", user))
        }
    }
}
