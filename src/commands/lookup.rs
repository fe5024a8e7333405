use crate::{
    commands::{LinkButton, Reply, TrackLookup},
    spotify::LookupError,
    types::Track,
    utils,
};

/// Handles the URL form of the lookup.
///
/// Input that does not contain a Spotify track URL gets `Invalid track URL.`
/// without any API call.
pub async fn lookup_url<L: TrackLookup>(url: &str, lookup: &L) -> Reply {
    match utils::extract_track_id(url) {
        Some(track_id) => lookup_track(track_id, lookup).await,
        None => Reply::text("Invalid track URL."),
    }
}

/// Fetches a track and requires an ISRC on it.
///
/// # Errors
///
/// - [`LookupError::NotFoundOrApi`] from the API call
/// - [`LookupError::IsrcUnavailable`] when `external_ids` has no `isrc`
pub async fn resolve_isrc<L: TrackLookup>(
    track_id: &str,
    lookup: &L,
) -> Result<(Track, String), LookupError> {
    let track = lookup.get_track(track_id).await?;
    let isrc = track.isrc().map(str::to_string);
    match isrc {
        Some(isrc) => Ok((track, isrc)),
        None => Err(LookupError::IsrcUnavailable {
            track: Box::new(track),
        }),
    }
}

/// Looks up the ISRC for `track_id` and formats the reply.
pub async fn lookup_track<L: TrackLookup>(track_id: &str, lookup: &L) -> Reply {
    match resolve_isrc(track_id, lookup).await {
        Ok((track, isrc)) => Reply::text(utils::isrc_message(&track, &isrc))
            .with_button(LinkButton::youtube_search(&isrc)),
        Err(LookupError::IsrcUnavailable { track }) => {
            Reply::text(utils::isrc_unavailable_message(&track))
        }
        Err(e) => Reply::text(format!(
            "there was an error while looking up track {}: {}",
            track_id, e
        )),
    }
}
