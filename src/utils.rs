use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::types::Track;

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Matches `open.spotify.com/track/<id>`, optionally with an `intl-xx/` locale segment.
static TRACK_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"open\.spotify\.com/(intl-[a-z]{2}/)?track/([0-9A-Za-z_]+)")
        .expect("track url regex is valid")
});

/// Extracts the track id from a Spotify track URL.
///
/// The pattern is searched anywhere in the input, so scheme, query strings
/// and surrounding text are ignored. Returns `None` when there is no track
/// path segment or no id after it.
pub fn extract_track_id(input: &str) -> Option<&str> {
    TRACK_URL_REGEX
        .captures(input)
        .and_then(|captures| captures.get(2))
        .map(|id| id.as_str())
}

/// Renders artist names in bold, comma separated: `**A**, **B**`.
pub fn format_artists<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| format!("**{}**", name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn isrc_message(track: &Track, isrc: &str) -> String {
    format!(
        "ISRC for track **{}** by {} is **{}**.",
        track.name,
        format_artists(&track.artist_names()),
        isrc
    )
}

pub fn isrc_unavailable_message(track: &Track) -> String {
    format!(
        "No ISRC is available for track **{}** by {}.",
        track.name,
        format_artists(&track.artist_names())
    )
}

/// YouTube search for the quoted ISRC, e.g. `...results?search_query=%22US1234567%22`.
pub fn youtube_search_url(isrc: &str) -> String {
    let query = format!("\"{}\"", isrc);
    match Url::parse_with_params(YOUTUBE_SEARCH_URL, &[("search_query", query.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}?search_query={}", YOUTUBE_SEARCH_URL, query),
    }
}

/// Discord mention markup for a user id.
pub fn mention(user_id: u64) -> String {
    format!("<@{}>", user_id)
}
