use std::{collections::HashMap, time::Duration};

use axum::{
    Form, Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use isrc_lookup::{
    commands,
    management::{CredentialManager, RenewalSchedule},
    spotify::{self, AuthError, ClientCredentials, LookupError, SpotifyClient, TokenProvider},
    types::Token,
};
use serde_json::json;

// base64("client-id:super-secret")
const EXPECTED_BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOnN1cGVyLXNlY3JldA==";
const ACCESS_TOKEN: &str = "test-token";

async fn token_endpoint(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if authorization != EXPECTED_BASIC_AUTH {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid_client", "error_description": "Invalid client"})),
        )
            .into_response();
    }
    if form.get("grant_type").map(String::as_str) != Some("client_credentials") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unsupported_grant_type"})),
        )
            .into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn empty_token_endpoint() -> Response {
    Json(json!({"access_token": "", "token_type": "Bearer", "expires_in": 3600})).into_response()
}

async fn track_endpoint(headers: HeaderMap, Path(id): Path<String>) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if authorization != format!("Bearer {}", ACCESS_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
        )
            .into_response();
    }

    match id.as_str() {
        "abc123" => Json(json!({
            "id": "abc123",
            "name": "Song",
            "artists": [{"id": "a", "name": "A"}, {"id": "b", "name": "B"}],
            "external_ids": {"isrc": "US1234567"}
        }))
        .into_response(),
        "noisrc" => Json(json!({
            "id": "noisrc",
            "name": "Bootleg",
            "artists": [{"name": "C"}]
        }))
        .into_response(),
        "bad" => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"status": 400, "message": "invalid id"}})),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

// Starts a local stand-in for the accounts service and the Web API
async fn serve() -> String {
    let router = Router::new()
        .route("/api/token", post(token_endpoint))
        .route("/api/empty-token", post(empty_token_endpoint))
        .route("/v1/tracks/{id}", get(track_endpoint));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn create_credentials(base: &str, path: &str, secret: &str) -> ClientCredentials {
    ClientCredentials::new(
        reqwest::Client::new(),
        format!("{}{}", base, path),
        "client-id",
        secret,
    )
}

fn create_client(base: &str, access_token: &str) -> SpotifyClient {
    SpotifyClient::new(
        reqwest::Client::new(),
        format!("{}/v1", base),
        Token {
            access_token: access_token.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
            obtained_at: Utc::now().timestamp() as u64,
        },
    )
}

#[tokio::test]
async fn test_client_credentials_exchange() {
    let base = serve().await;

    let token = create_credentials(&base, "/api/token", "super-secret")
        .request_token()
        .await
        .expect("token exchange succeeds");

    assert_eq!(token.access_token, ACCESS_TOKEN);
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
}

#[tokio::test]
async fn test_client_credentials_rejected() {
    let base = serve().await;

    let err = create_credentials(&base, "/api/token", "wrong-secret")
        .request_token()
        .await
        .unwrap_err();

    match err {
        AuthError::Rejected { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("invalid_client"));
        }
        other => panic!("expected a rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_credentials_empty_token_is_malformed() {
    let base = serve().await;

    let err = create_credentials(&base, "/api/empty-token", "super-secret")
        .request_token()
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Malformed(_)));
}

#[tokio::test]
async fn test_client_credentials_times_out_on_silent_server() {
    // Accepts connections but never writes a response
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let http = spotify::http_client(Duration::from_millis(200)).unwrap();
    let credentials = ClientCredentials::new(
        http,
        format!("http://{}/api/token", addr),
        "client-id",
        "super-secret",
    );

    let result = tokio::time::timeout(Duration::from_secs(5), credentials.request_token())
        .await
        .expect("request gives up on its own");

    match result {
        Err(AuthError::Request(e)) => assert!(e.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_track() {
    let base = serve().await;

    let track = create_client(&base, ACCESS_TOKEN)
        .get_track("abc123")
        .await
        .expect("track exists");

    assert_eq!(track.name, "Song");
    assert_eq!(track.artist_names(), vec!["A", "B"]);
    assert_eq!(track.isrc(), Some("US1234567"));
}

#[tokio::test]
async fn test_get_track_without_external_ids() {
    let base = serve().await;

    let track = create_client(&base, ACCESS_TOKEN)
        .get_track("noisrc")
        .await
        .expect("track exists");

    assert_eq!(track.name, "Bootleg");
    assert_eq!(track.isrc(), None);
}

#[tokio::test]
async fn test_get_track_not_found() {
    let base = serve().await;

    let err = create_client(&base, ACCESS_TOKEN)
        .get_track("missing")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::NotFoundOrApi(_)));
    assert_eq!(err.to_string(), "track missing not found");
}

#[tokio::test]
async fn test_get_track_reports_api_error_message() {
    let base = serve().await;

    let err = create_client(&base, ACCESS_TOKEN)
        .get_track("bad")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid id (400 Bad Request)");

    // The track call authenticates with the bearer token
    let err = create_client(&base, "stale-token")
        .get_track("abc123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid access token (401 Unauthorized)");
}

#[tokio::test]
async fn test_url_lookup_through_credential_manager() {
    let base = serve().await;
    let http = reqwest::Client::new();

    let manager = CredentialManager::initialize(
        ClientCredentials::new(
            http.clone(),
            format!("{}/api/token", base),
            "client-id",
            "super-secret",
        ),
        http,
        format!("{}/v1", base),
        RenewalSchedule::default(),
    )
    .await
    .expect("initial exchange succeeds");

    let reply = commands::lookup_url("https://open.spotify.com/track/abc123", &manager).await;
    assert_eq!(
        reply.content,
        "ISRC for track **Song** by **A**, **B** is **US1234567**."
    );
    assert!(reply.button.unwrap().url.contains("US1234567"));

    let reply = commands::lookup_url("https://open.spotify.com/track/missing", &manager).await;
    assert_eq!(
        reply.content,
        "there was an error while looking up track missing: track missing not found"
    );
}
