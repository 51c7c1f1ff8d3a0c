//! Token authentication and access logging.

use crate::state::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use tracing::warn;

/// Check the shared-secret `token` header against the secrets store.
///
/// A missing or empty header fails fast without touching the store. Any
/// failure while fetching the expected token also denies the request: an
/// unreachable secrets store must never turn into an open gateway.
pub async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get("token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED.into_response());
    }

    match state.secrets().fetch().await {
        Ok(bundle) if bundle.finance_token() == token => Ok(()),
        Ok(_) => Err(StatusCode::UNAUTHORIZED.into_response()),
        Err(e) => {
            warn!(error = %e, "Authorization check could not fetch expected token");
            Err(StatusCode::UNAUTHORIZED.into_response())
        }
    }
}

/// Record every request in the remote access log.
///
/// The relay post runs in a spawned task so a slow logging service never
/// delays the response.
pub async fn log_access(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ip_address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let resource = format!(
        "{}{}",
        state.config().server.public_base_url,
        request.uri().path()
    );

    tokio::spawn(async move {
        state.relay_access(&resource, &ip_address).await;
    });

    next.run(request).await
}
