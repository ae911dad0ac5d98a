//! # Date backend
//!
//! `GET /api/date` answers with the server's current UTC time as plain text in
//! RFC 850 form (`Monday, 15-Jan-24 10:30:00 UTC`).
//!
//! Requests pass through a bearer middleware that extracts
//! `Authorization: Bearer <token>` and attaches it as a [`BearerToken`] extension.
//! With `server.require_auth` a missing or malformed header is answered with `401`;
//! without it the request continues unauthenticated. Verifying the token's signature
//! is the identity provider's job and does not happen here.
//!
//! CORS allows any origin with `GET, POST, OPTIONS` and the `Content-Type` and
//! `Authorization` headers, so browser preflights succeed.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::{ServerConfig, DEFAULT_DATE_PATH};

/// Bearer token presented by the caller, unverified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// Router serving the date endpoint with its auth and CORS layers.
pub fn date_routes(config: &ServerConfig) -> Router {
    Router::new()
        .route(DEFAULT_DATE_PATH, get(get_date))
        .layer(middleware::from_fn_with_state(
            config.require_auth,
            require_bearer,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
}

/// Format `now` the way the endpoint reports it.
pub fn format_rfc850(now: DateTime<Utc>) -> String {
    now.format("%A, %d-%b-%y %H:%M:%S UTC").to_string()
}

async fn get_date(request: Request) -> String {
    match request.extensions().get::<BearerToken>() {
        Some(_) => debug!("serving date to authenticated caller"),
        None => debug!("serving date without a bearer token"),
    }
    format_rfc850(Utc::now())
}

fn bearer_token(headers: &HeaderMap) -> Option<BearerToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme != "Bearer" || token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(BearerToken(token.to_string()))
}

async fn require_bearer(
    State(require_auth): State<bool>,
    mut request: Request,
    next: Next,
) -> Response {
    match bearer_token(request.headers()) {
        Some(token) => {
            request.extensions_mut().insert(token);
        }
        None if require_auth => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response();
        }
        None => {}
    }
    next.run(request).await
}
