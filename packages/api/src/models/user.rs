//! # Identity record for the signed-in user
//!
//! [`UserInfo`] is the projection of the identity provider's account that the rest of
//! the application sees: the provider-assigned `uid` and the account email. Tokens are
//! never part of it; they stay inside the provider.

use serde::{Deserialize, Serialize};

/// User information safe to hand to any component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub uid: String,
    pub email: String,
}

impl UserInfo {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }

    /// The part of the email before `@`, used to greet the user.
    pub fn username(&self) -> &str {
        self.email
            .split_once('@')
            .map_or(self.email.as_str(), |(name, _)| name)
    }
}
