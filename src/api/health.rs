use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{management::CredentialManager, spotify::TokenProvider};

pub async fn health<P: TokenProvider>(
    Extension(credentials): Extension<Arc<CredentialManager<P>>>,
) -> Json<Value> {
    let status = credentials.status().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "credentials": status,
    }))
}
