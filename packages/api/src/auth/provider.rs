//! The seam between the application and the external identity provider.

use async_trait::async_trait;

use super::AuthError;
use crate::models::UserInfo;

/// Capabilities an identity provider's client library offers.
///
/// Implementations own whatever credentials back the session (ID and refresh tokens);
/// callers only ever see the [`UserInfo`] and short-lived bearer tokens. Futures are
/// not `Send` so the same implementations run on the browser's single-threaded
/// executor.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Sign in an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo, AuthError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserInfo, AuthError>;

    /// Drop the current credentials. Signing out when nobody is signed in succeeds.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// A bearer token for the current session, refreshed if it is about to expire.
    async fn id_token(&self) -> Result<String, AuthError>;
}
