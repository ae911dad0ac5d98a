//! # Firebase Authentication over its REST API
//!
//! [`FirebaseAuth`] is the hosted identity provider. It speaks the Identity Toolkit
//! and Secure Token endpoints with `reqwest`, so the same code runs in the browser
//! (fetch-backed) and natively.
//!
//! ## Flow
//!
//! 1. **Sign in / sign up**: `POST {auth_endpoint}/accounts:signInWithPassword` or
//!    `accounts:signUp` with `{ email, password, returnSecureToken: true }`. The reply
//!    carries `localId`, `idToken`, `refreshToken` and `expiresIn` (seconds, as a string).
//! 2. **Token retrieval**: [`id_token`](IdentityProvider::id_token) hands out the cached
//!    ID token, exchanging the refresh token at `POST {token_endpoint}/token` first when
//!    it expires within [`REFRESH_MARGIN_SECS`]. Nothing refreshes in the background.
//! 3. **Errors**: non-2xx replies carry `{ "error": { "message": "CODE" } }` and are
//!    turned into [`AuthError`]s via [`AuthError::from_provider_code`].

use std::cell::RefCell;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AuthError, AuthErrorKind, IdentityProvider};
use crate::config::AuthConfig;
use crate::models::UserInfo;

/// Refresh the ID token when it has less than this many seconds left.
pub const REFRESH_MARGIN_SECS: i64 = 5 * 60;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
struct Credentials {
    user: UserInfo,
    id_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

/// Firebase Authentication client for one project.
pub struct FirebaseAuth {
    http: Client,
    api_key: String,
    auth_endpoint: String,
    token_endpoint: String,
    credentials: RefCell<Option<Credentials>>,
}

impl FirebaseAuth {
    pub fn new(
        api_key: impl Into<String>,
        auth_endpoint: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            auth_endpoint: auth_endpoint.into().trim_end_matches('/').to_string(),
            token_endpoint: token_endpoint.into().trim_end_matches('/').to_string(),
            credentials: RefCell::new(None),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.api_key.trim().is_empty() {
            return Err(AuthError::config(
                "auth.api_key must be set to use the Firebase provider",
            ));
        }
        Ok(Self::new(
            config.api_key.clone(),
            config.auth_endpoint.clone(),
            config.token_endpoint.clone(),
        ))
    }

    async fn password_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, AuthError> {
        let response = self
            .http
            .post(format!("{}/accounts:{method}", self.auth_endpoint))
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequest {
                email: email.trim(),
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(AuthError::network)?;
        let reply: PasswordResponse = decode(response).await?;

        let user = UserInfo::new(reply.local_id, reply.email);
        *self.credentials.borrow_mut() = Some(Credentials {
            user: user.clone(),
            id_token: reply.id_token,
            refresh_token: reply.refresh_token,
            expires_at: expiry(&reply.expires_in)?,
        });
        Ok(user)
    }

    async fn refresh(&self, current: Credentials) -> Result<String, AuthError> {
        debug!(uid = %current.user.uid, "refreshing id token");
        let response = self
            .http
            .post(format!("{}/token", self.token_endpoint))
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", current.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(AuthError::network)?;

        let result: Result<RefreshResponse, AuthError> = decode(response).await;

        // Sign-out or another sign-in may have replaced the credentials during the
        // request. Only the session this refresh started from may be updated.
        let mut stored = self.credentials.borrow_mut();
        let unchanged = stored
            .as_ref()
            .is_some_and(|held| held.refresh_token == current.refresh_token);
        if !unchanged {
            debug!(uid = %current.user.uid, "session changed during refresh, dropping token");
            return Err(AuthError::no_session());
        }

        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                if err.kind == AuthErrorKind::SessionRevoked {
                    stored.take();
                }
                return Err(err);
            }
        };

        let token = reply.id_token.clone();
        *stored = Some(Credentials {
            id_token: reply.id_token,
            refresh_token: reply.refresh_token,
            expires_at: expiry(&reply.expires_in)?,
            ..current
        });
        Ok(token)
    }
}

fn expiry(expires_in: &str) -> Result<DateTime<Utc>, AuthError> {
    let secs: i64 = expires_in.trim().parse().map_err(|_| {
        AuthError::new(
            AuthErrorKind::Provider,
            format!("Malformed token lifetime: {expires_in}"),
        )
    })?;
    Ok(Utc::now() + Duration::seconds(secs))
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AuthError> {
    let status = response.status();
    if status.is_success() {
        return response.json().await.map_err(AuthError::network);
    }
    match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => Err(AuthError::from_provider_code(&envelope.error.message)),
        Err(_) => Err(AuthError::new(
            AuthErrorKind::Provider,
            format!("Authentication failed: HTTP {}", status.as_u16()),
        )),
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.credentials.borrow_mut().take();
        Ok(())
    }

    async fn id_token(&self) -> Result<String, AuthError> {
        let current = self
            .credentials
            .borrow()
            .clone()
            .ok_or_else(AuthError::no_session)?;

        if current.expires_at - Utc::now() > Duration::seconds(REFRESH_MARGIN_SECS) {
            return Ok(current.id_token);
        }
        self.refresh(current).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use serde_json::{json, Value};
    use tokio::sync::Notify;

    use super::*;
    use crate::auth::testing::serve;

    fn provider_error(code: &str) -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": code } })),
        )
    }

    /// Identity Toolkit double: one account `ada@example.com` / `secret1`.
    /// `expires_in` controls the lifetime of tokens it hands out.
    async fn identity_toolkit(expires_in: &'static str) -> String {
        let sign_in = move |Query(query): Query<HashMap<String, String>>,
                            Json(body): Json<Value>| async move {
            if query.get("key").map(String::as_str) != Some("test-key") {
                return provider_error("API_KEY_INVALID");
            }
            if body["returnSecureToken"] != json!(true) {
                return provider_error("MISSING_RETURN_SECURE_TOKEN");
            }
            match (body["email"].as_str(), body["password"].as_str()) {
                (Some("ada@example.com"), Some("secret1")) => (
                    StatusCode::OK,
                    Json(json!({
                        "localId": "uid-ada",
                        "email": "ada@example.com",
                        "idToken": "id-1",
                        "refreshToken": "refresh-1",
                        "expiresIn": expires_in,
                    })),
                ),
                (Some("ada@example.com"), _) => provider_error("INVALID_LOGIN_CREDENTIALS"),
                _ => provider_error("EMAIL_NOT_FOUND"),
            }
        };
        let sign_up = |Json(body): Json<Value>| async move {
            if body["email"] == json!("ada@example.com") {
                provider_error("EMAIL_EXISTS")
            } else {
                provider_error("WEAK_PASSWORD : Password should be at least 6 characters")
            }
        };
        let token = |Form(form): Form<HashMap<String, String>>| async move {
            match (
                form.get("grant_type").map(String::as_str),
                form.get("refresh_token").map(String::as_str),
            ) {
                (Some("refresh_token"), Some("refresh-1")) => (
                    StatusCode::OK,
                    Json(json!({
                        "id_token": "id-2",
                        "refresh_token": "refresh-2",
                        "expires_in": "3600",
                        "user_id": "uid-ada",
                    })),
                ),
                _ => provider_error("INVALID_REFRESH_TOKEN"),
            }
        };

        let router = Router::new()
            .route("/v1/accounts:signInWithPassword", post(sign_in))
            .route("/v1/accounts:signUp", post(sign_up))
            .route("/token/token", post(token));
        serve(router).await
    }

    fn client(base: &str) -> FirebaseAuth {
        FirebaseAuth::new("test-key", format!("{base}/v1"), format!("{base}/token"))
    }

    #[tokio::test]
    async fn test_sign_in_caches_token() {
        let base = identity_toolkit("3600").await;
        let auth = client(&base);

        let user = auth.sign_in("ada@example.com", "secret1").await.unwrap();

        assert_eq!(user, UserInfo::new("uid-ada", "ada@example.com"));
        assert_eq!(auth.id_token().await.unwrap(), "id-1");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let base = identity_toolkit("3600").await;
        let err = client(&base)
            .sign_in("ada@example.com", "wrongpass")
            .await
            .unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_sign_up_errors_are_mapped() {
        let base = identity_toolkit("3600").await;
        let auth = client(&base);

        let exists = auth.sign_up("ada@example.com", "secret1").await.unwrap_err();
        assert_eq!(exists.kind, AuthErrorKind::EmailExists);

        let weak = auth.sign_up("bob@example.com", "123").await.unwrap_err();
        assert_eq!(weak.kind, AuthErrorKind::WeakPassword);
        assert_eq!(weak.message, "Password should be at least 6 characters");
    }

    #[tokio::test]
    async fn test_expiring_token_is_refreshed() {
        let base = identity_toolkit("60").await;
        let auth = client(&base);
        auth.sign_in("ada@example.com", "secret1").await.unwrap();

        assert_eq!(auth.id_token().await.unwrap(), "id-2");
        // the refreshed token is valid for an hour, so it is served from cache
        assert_eq!(auth.id_token().await.unwrap(), "id-2");
    }

    #[tokio::test]
    async fn test_rejected_refresh_drops_credentials() {
        let base = identity_toolkit("60").await;
        let auth = client(&base);
        auth.sign_in("ada@example.com", "secret1").await.unwrap();
        auth.credentials.borrow_mut().as_mut().unwrap().refresh_token = "stale".into();

        let err = auth.id_token().await.unwrap_err();

        assert_eq!(err.kind, AuthErrorKind::SessionRevoked);
        assert_eq!(auth.id_token().await.unwrap_err(), AuthError::no_session());
    }

    #[tokio::test]
    async fn test_sign_out_during_refresh_stays_signed_out() {
        let release = Arc::new(Notify::new());
        let gate = release.clone();
        let sign_in = |Json(_): Json<Value>| async {
            Json(json!({
                "localId": "uid-ada",
                "email": "ada@example.com",
                "idToken": "id-1",
                "refreshToken": "refresh-1",
                "expiresIn": "60",
            }))
        };
        let token = move || {
            let gate = gate.clone();
            async move {
                gate.notified().await;
                Json(json!({
                    "id_token": "id-2",
                    "refresh_token": "refresh-2",
                    "expires_in": "3600",
                }))
            }
        };
        let base = serve(
            Router::new()
                .route("/v1/accounts:signInWithPassword", post(sign_in))
                .route("/token/token", post(token)),
        )
        .await;
        let auth = client(&base);
        auth.sign_in("ada@example.com", "secret1").await.unwrap();

        let (refreshed, _) = tokio::join!(auth.id_token(), async {
            auth.sign_out().await.unwrap();
            release.notify_one();
        });

        assert_eq!(refreshed.unwrap_err(), AuthError::no_session());
        assert_eq!(auth.id_token().await.unwrap_err(), AuthError::no_session());
    }

    #[tokio::test]
    async fn test_sign_out_without_session() {
        let auth = FirebaseAuth::new("test-key", "http://127.0.0.1:9", "http://127.0.0.1:9");
        auth.sign_out().await.unwrap();
        assert_eq!(auth.id_token().await.unwrap_err(), AuthError::no_session());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_network_error() {
        let auth = FirebaseAuth::new("test-key", "http://127.0.0.1:9", "http://127.0.0.1:9");
        let err = auth.sign_in("ada@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::Network);
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let config = AuthConfig {
            provider: crate::config::ProviderKind::Firebase,
            api_key: String::new(),
            ..AuthConfig::default()
        };
        let err = FirebaseAuth::from_config(&config).err().unwrap();
        assert_eq!(err.kind, AuthErrorKind::Config);
    }
}
