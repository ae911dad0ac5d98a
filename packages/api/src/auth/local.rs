//! # Local identity provider
//!
//! An in-process stand-in for the hosted provider: accounts live in memory with
//! Argon2id password hashes, and each sign-in mints an opaque UUID bearer token.
//! It enforces the same account rules as the hosted provider so forms behave the same
//! against either, which makes it the default for development and the backbone of the
//! test-suite.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::{AuthError, AuthErrorKind, IdentityProvider};
use crate::models::UserInfo;

/// Minimum password length accepted on registration.
pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    uid: String,
    password_hash: String,
}

struct SignedIn {
    user: UserInfo,
    token: String,
}

#[derive(Default)]
pub struct LocalAuth {
    accounts: RefCell<HashMap<String, Account>>,
    current: RefCell<Option<SignedIn>>,
}

impl LocalAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_session(&self, user: UserInfo) -> UserInfo {
        let token = Uuid::new_v4().to_string();
        *self.current.borrow_mut() = Some(SignedIn {
            user: user.clone(),
            token,
        });
        user
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((name, domain)) if !name.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::from_provider_code("INVALID_EMAIL")),
    }
}

#[async_trait(?Send)]
impl IdentityProvider for LocalAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        let email = normalize_email(email)?;
        let uid = {
            let accounts = self.accounts.borrow();
            let Some(account) = accounts.get(&email) else {
                return Err(AuthError::from_provider_code("EMAIL_NOT_FOUND"));
            };
            if !verify_password(password, &account.password_hash)? {
                return Err(AuthError::from_provider_code("INVALID_PASSWORD"));
            }
            account.uid.clone()
        };
        Ok(self.start_session(UserInfo::new(uid, email)))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::new(
                AuthErrorKind::WeakPassword,
                format!("Password should be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if self.accounts.borrow().contains_key(&email) {
            return Err(AuthError::from_provider_code("EMAIL_EXISTS"));
        }

        let account = Account {
            uid: Uuid::new_v4().simple().to_string(),
            password_hash: hash_password(password)?,
        };
        let user = UserInfo::new(account.uid.clone(), email.clone());
        self.accounts.borrow_mut().insert(email, account);
        Ok(self.start_session(user))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.current.borrow_mut().take();
        Ok(())
    }

    async fn id_token(&self) -> Result<String, AuthError> {
        self.current
            .borrow()
            .as_ref()
            .map(|session| session.token.clone())
            .ok_or_else(AuthError::no_session)
    }
}
