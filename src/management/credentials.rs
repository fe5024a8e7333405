use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::{
    sync::RwLock,
    task::JoinHandle,
    time::{sleep, timeout},
};

use crate::{
    Res, config, info,
    spotify::{self, AuthError, ClientCredentials, HTTP_TIMEOUT, SpotifyClient, TokenProvider},
    types::{CredentialState, CredentialStatus, Token},
    warning,
};

/// Delay between successful renewals. Spotify tokens live for an hour.
pub const RENEWAL_INTERVAL: Duration = Duration::from_secs(40 * 60);

/// Delay before retrying a failed renewal.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// Deadline for one token exchange, on top of the HTTP client timeout.
pub const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalSchedule {
    pub renew_after: Duration,
    pub retry_after: Duration,
    pub request_timeout: Duration,
}

impl Default for RenewalSchedule {
    fn default() -> Self {
        Self {
            renew_after: RENEWAL_INTERVAL,
            retry_after: RETRY_INTERVAL,
            request_timeout: TOKEN_REQUEST_TIMEOUT,
        }
    }
}

impl RenewalSchedule {
    /// Long interval after a success, short interval after a failure.
    pub fn next_delay<E>(&self, outcome: &Result<(), E>) -> Duration {
        match outcome {
            Ok(()) => self.renew_after,
            Err(_) => self.retry_after,
        }
    }
}

struct Slot {
    client: Arc<SpotifyClient>,
    status: CredentialStatus,
}

/// Owns the shared Spotify client handle and keeps its token fresh.
///
/// The manager only exists once a first token exchange has succeeded, so a
/// constructed manager always hands out a usable client. Renewal runs in a
/// single background task (see [`CredentialManager::spawn_renewal`]) and
/// replaces the client in one write; readers get an `Arc` to either the old
/// or the new generation and keep using it for the rest of their request.
pub struct CredentialManager<P: TokenProvider = ClientCredentials> {
    provider: P,
    http: Client,
    api_url: String,
    schedule: RenewalSchedule,
    slot: RwLock<Slot>,
}

impl<P: TokenProvider> CredentialManager<P> {
    /// Performs the first token exchange and builds the initial client.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] of the exchange. Callers treat this as fatal:
    /// without a first token the bot cannot serve a single command.
    pub async fn initialize(
        provider: P,
        http: Client,
        api_url: impl Into<String>,
        schedule: RenewalSchedule,
    ) -> Result<Self, AuthError> {
        let api_url = api_url.into();
        let token = request_token(&provider, schedule.request_timeout).await?;
        let status = active_status(&token);
        let client = Arc::new(SpotifyClient::new(http.clone(), api_url.clone(), token));

        Ok(Self {
            provider,
            http,
            api_url,
            schedule,
            slot: RwLock::new(Slot { client, status }),
        })
    }

    /// Current client generation.
    ///
    /// The read lock is released before returning, so the caller never holds
    /// up a renewal while its request is in flight.
    pub async fn client(&self) -> Arc<SpotifyClient> {
        Arc::clone(&self.slot.read().await.client)
    }

    pub async fn status(&self) -> CredentialStatus {
        self.slot.read().await.status.clone()
    }

    /// Makes one renewal attempt.
    ///
    /// On success the client is swapped and the state returns to `Active`.
    /// On failure the current client stays in place and the failure counter
    /// of the `Retrying` state is bumped.
    pub async fn renew(&self) -> Result<(), AuthError> {
        // The exchange happens before the write lock is taken.
        match request_token(&self.provider, self.schedule.request_timeout).await {
            Ok(token) => {
                let status = active_status(&token);
                let client = Arc::new(SpotifyClient::new(
                    self.http.clone(),
                    self.api_url.clone(),
                    token,
                ));

                let mut slot = self.slot.write().await;
                slot.client = client;
                slot.status = status;
                Ok(())
            }
            Err(err) => {
                let mut slot = self.slot.write().await;
                let failures = match slot.status.state {
                    CredentialState::Active => 1,
                    CredentialState::Retrying { failures } => failures + 1,
                };
                slot.status.state = CredentialState::Retrying { failures };
                Err(err)
            }
        }
    }

    /// Runs renewals forever: sleep, renew, pick the next delay, repeat.
    ///
    /// Never returns and never panics on renewal errors. Abort the returned
    /// handle to stop it at shutdown.
    pub fn spawn_renewal(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move { manager.renewal_loop().await })
    }

    async fn renewal_loop(&self) {
        let mut delay = self.schedule.renew_after;
        loop {
            sleep(delay).await;

            let outcome = self.renew().await;
            delay = self.schedule.next_delay(&outcome);
            match outcome {
                Ok(()) => info!("Spotify token renewed, next renewal in {}s.", delay.as_secs()),
                Err(e) => warning!(
                    "Failed to renew spotify token, retrying in {}s: {}",
                    delay.as_secs(),
                    e
                ),
            }
        }
    }
}

impl CredentialManager<ClientCredentials> {
    /// Initializes against the real accounts service using the environment
    /// configuration and the default 40 minute / 1 minute schedule.
    pub async fn from_env() -> Res<Self> {
        let http = spotify::http_client(HTTP_TIMEOUT)?;
        let provider = ClientCredentials::from_env(http.clone())?;
        let manager = Self::initialize(
            provider,
            http,
            config::spotify_apiurl(),
            RenewalSchedule::default(),
        )
        .await?;
        Ok(manager)
    }
}

/// Bounds one token exchange by `limit`, so a silent provider cannot stall the renewal loop.
async fn request_token<P: TokenProvider>(provider: &P, limit: Duration) -> Result<Token, AuthError> {
    match timeout(limit, provider.request_token()).await {
        Ok(result) => result,
        Err(_) => Err(AuthError::Timeout(limit)),
    }
}

fn active_status(token: &Token) -> CredentialStatus {
    let renewed_at = DateTime::from_timestamp(token.obtained_at as i64, 0).unwrap_or_else(Utc::now);
    let expires_at =
        DateTime::from_timestamp(token.expires_at() as i64, 0).unwrap_or(renewed_at);
    CredentialStatus {
        state: CredentialState::Active,
        renewed_at,
        expires_at,
    }
}
