//! # Session store: the single owner of the authentication state
//!
//! [`AuthStore`] wraps an [`IdentityProvider`] and exclusively owns the mutable
//! [`Session`]. It publishes every change on a `tokio::sync::watch` channel; components
//! subscribe to it and get read access plus the four operations, never a way to write
//! the session directly.
//!
//! The store is cheap to clone (two `Rc`s) and clones share the same session. Two
//! stores compare equal only when they are clones of one another, which lets the UI
//! re-run effects when the store it depends on is replaced.

use std::rc::Rc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{AuthError, AuthErrorKind, FirebaseAuth, IdentityProvider, LocalAuth};
use crate::config::{AuthConfig, ProviderKind};
use crate::models::{Session, UserInfo};

#[derive(Clone)]
pub struct AuthStore {
    provider: Rc<dyn IdentityProvider>,
    session: Rc<watch::Sender<Session>>,
}

impl AuthStore {
    /// Start with an anonymous session backed by `provider`.
    pub fn new(provider: impl IdentityProvider + 'static) -> Self {
        let (session, _) = watch::channel(Session::anonymous());
        Self {
            provider: Rc::new(provider),
            session: Rc::new(session),
        }
    }

    /// Build the provider selected by `auth.provider`.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        match config.provider {
            ProviderKind::Firebase => Ok(Self::new(FirebaseAuth::from_config(config)?)),
            ProviderKind::Local => Ok(Self::new(LocalAuth::new())),
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.session.borrow().current_user().cloned()
    }

    /// Receiver notified after every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        debug!(email, "signing in");
        match self.provider.sign_in(email, password).await {
            Ok(user) => {
                info!(uid = %user.uid, "signed in");
                self.publish(Session::signed_in(user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!(kind = ?err.kind, "sign in failed");
                Err(err)
            }
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        debug!(email, "registering");
        match self.provider.sign_up(email, password).await {
            Ok(user) => {
                info!(uid = %user.uid, "registered");
                self.publish(Session::signed_in(user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!(kind = ?err.kind, "registration failed");
                Err(err)
            }
        }
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Err(err) = self.provider.sign_out().await {
            warn!(kind = ?err.kind, "sign out failed");
            return Err(err);
        }
        info!("signed out");
        self.publish(Session::anonymous());
        Ok(())
    }

    /// Bearer token for the current session.
    ///
    /// A revoked session is cleared before the error is returned.
    pub async fn get_id_token(&self) -> Result<String, AuthError> {
        match self.provider.id_token().await {
            Ok(token) => Ok(token),
            Err(err) => {
                if err.kind == AuthErrorKind::SessionRevoked {
                    warn!("session revoked by the identity provider");
                    self.publish(Session::anonymous());
                }
                Err(err)
            }
        }
    }

    fn publish(&self, next: Session) {
        self.session.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("session", &*self.session.borrow())
            .finish_non_exhaustive()
    }
}
