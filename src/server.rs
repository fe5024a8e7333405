use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};

use crate::{Res, api, management::CredentialManager, spotify::TokenProvider};

pub fn router<P: TokenProvider>(credentials: Arc<CredentialManager<P>>) -> Router {
    Router::new()
        .route("/health", get(api::health::<P>))
        .layer(Extension(credentials))
}

pub async fn start_api_server<P: TokenProvider>(
    addr: &str,
    credentials: Arc<CredentialManager<P>>,
) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(credentials)).await?;
    Ok(())
}
