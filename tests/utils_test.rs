use std::collections::HashMap;

use isrc_lookup::types::{Track, TrackArtist};
use isrc_lookup::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, artists: &[&str], isrc: Option<&str>) -> Track {
    let mut external_ids = HashMap::new();
    if let Some(isrc) = isrc {
        external_ids.insert("isrc".to_string(), isrc.to_string());
    }
    Track {
        id: Some("abc123".to_string()),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|name| TrackArtist {
                id: None,
                name: name.to_string(),
            })
            .collect(),
        external_ids,
    }
}

#[test]
fn test_extract_track_id_plain_url() {
    assert_eq!(
        extract_track_id("https://open.spotify.com/track/abc123"),
        Some("abc123")
    );
}

#[test]
fn test_extract_track_id_with_locale_prefix() {
    assert_eq!(
        extract_track_id("https://open.spotify.com/intl-de/track/4uLU6hMCjMI75M1A2tKUQC"),
        Some("4uLU6hMCjMI75M1A2tKUQC")
    );
}

#[test]
fn test_extract_track_id_ignores_query_and_surrounding_text() {
    assert_eq!(
        extract_track_id("listen: https://open.spotify.com/track/abc123?si=xyz789 !"),
        Some("abc123")
    );
    assert_eq!(extract_track_id("open.spotify.com/track/abc123"), Some("abc123"));
}

#[test]
fn test_extract_track_id_rejects_non_track_urls() {
    // No id after the track segment
    assert_eq!(extract_track_id("https://open.spotify.com/track/"), None);
    // Other resource types
    assert_eq!(extract_track_id("https://open.spotify.com/album/abc123"), None);
    assert_eq!(extract_track_id("https://open.spotify.com/playlist/abc123"), None);
    // Other hosts and free text
    assert_eq!(extract_track_id("https://example.com/track/abc123"), None);
    assert_eq!(extract_track_id("not a url"), None);
    assert_eq!(extract_track_id(""), None);
}

#[test]
fn test_extract_track_id_locale_must_be_two_letters() {
    // An unexpected locale segment does not match the optional prefix
    assert_eq!(
        extract_track_id("https://open.spotify.com/intl-deu/track/abc123"),
        None
    );
}

#[test]
fn test_extract_track_id_stops_at_non_ascii() {
    assert_eq!(
        extract_track_id("https://open.spotify.com/track/abcé"),
        Some("abc")
    );
    assert_eq!(
        extract_track_id("https://open.spotify.com/track/４５６"),
        None
    );
}

#[test]
fn test_format_artists() {
    assert_eq!(format_artists(&["A", "B"]), "**A**, **B**");
    assert_eq!(format_artists(&["Solo"]), "**Solo**");
    assert_eq!(format_artists::<&str>(&[]), "");
}

#[test]
fn test_isrc_message() {
    let track = create_test_track("Song", &["A", "B"], Some("US1234567"));
    assert_eq!(
        isrc_message(&track, "US1234567"),
        "ISRC for track **Song** by **A**, **B** is **US1234567**."
    );
}

#[test]
fn test_isrc_unavailable_message() {
    let track = create_test_track("Song", &["A"], None);
    assert_eq!(
        isrc_unavailable_message(&track),
        "No ISRC is available for track **Song** by **A**."
    );
}

#[test]
fn test_youtube_search_url_quotes_isrc() {
    let url = youtube_search_url("US1234567");
    assert_eq!(
        url,
        "https://www.youtube.com/results?search_query=%22US1234567%22"
    );
    assert!(url.contains("US1234567"));
}

#[test]
fn test_track_isrc() {
    assert_eq!(
        create_test_track("Song", &["A"], Some("US1234567")).isrc(),
        Some("US1234567")
    );
    assert_eq!(create_test_track("Song", &["A"], None).isrc(), None);
    assert_eq!(create_test_track("Song", &["A"], Some("")).isrc(), None);
}

#[test]
fn test_mention() {
    assert_eq!(mention(42), "<@42>");
}
