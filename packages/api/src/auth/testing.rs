//! Test doubles shared by the crate's unit tests.

use std::cell::RefCell;

use async_trait::async_trait;

use super::{AuthError, IdentityProvider};
use crate::models::UserInfo;

/// Provider that accepts any credentials and returns a scripted token.
pub(crate) struct StubProvider {
    token: Result<String, AuthError>,
    sign_out_error: Option<AuthError>,
    user: RefCell<Option<UserInfo>>,
}

impl StubProvider {
    pub(crate) fn with_token(token: Result<String, AuthError>) -> Self {
        Self {
            token,
            sign_out_error: None,
            user: RefCell::new(None),
        }
    }

    pub(crate) fn failing_sign_out(err: AuthError) -> Self {
        Self {
            sign_out_error: Some(err),
            ..Self::with_token(Ok("stub-token".to_string()))
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for StubProvider {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<UserInfo, AuthError> {
        let user = UserInfo::new("stub-uid", email);
        *self.user.borrow_mut() = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        self.sign_in(email, password).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(err) = &self.sign_out_error {
            return Err(err.clone());
        }
        self.user.borrow_mut().take();
        Ok(())
    }

    async fn id_token(&self) -> Result<String, AuthError> {
        self.token.clone()
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
