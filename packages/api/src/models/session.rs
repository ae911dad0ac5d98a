//! The in-memory authentication state.

use super::UserInfo;

/// Current authentication state: authenticated iff a user is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserInfo>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserInfo) -> Self {
        Self { user: Some(user) }
    }

    pub fn current_user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
