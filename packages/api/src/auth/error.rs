//! # Typed authentication errors
//!
//! Every failure coming out of an [`IdentityProvider`](super::IdentityProvider) is an
//! [`AuthError`]: a discriminated [`AuthErrorKind`] plus the human-readable message the
//! forms display verbatim. Hosted-provider error codes are translated here, at the point
//! where they are first observed, by [`AuthError::from_provider_code`].

use std::fmt::Display;

/// What went wrong, independent of how it is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidCredentials,
    UnknownAccount,
    EmailExists,
    WeakPassword,
    InvalidEmail,
    UserDisabled,
    TooManyAttempts,
    NoSession,
    SessionRevoked,
    Network,
    Config,
    Provider,
}

/// Error raised by login, registration, logout or token retrieval.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// No user is signed in, so there is no token to hand out.
    pub fn no_session() -> Self {
        Self::new(AuthErrorKind::NoSession, "no session")
    }

    pub fn network(err: impl Display) -> Self {
        Self::new(AuthErrorKind::Network, format!("Network error: {err}"))
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Config, message)
    }

    /// Map a hosted-provider error code such as `EMAIL_EXISTS` or
    /// `WEAK_PASSWORD : Password should be at least 6 characters`.
    pub fn from_provider_code(raw: &str) -> Self {
        let (code, detail) = match raw.split_once(':') {
            Some((code, detail)) => (code.trim(), Some(detail.trim())),
            None => (raw.trim(), None),
        };

        match code {
            "EMAIL_NOT_FOUND" => Self::new(
                AuthErrorKind::UnknownAccount,
                "No account exists for this email",
            ),
            "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                Self::new(AuthErrorKind::InvalidCredentials, "Invalid email or password")
            }
            "EMAIL_EXISTS" => Self::new(
                AuthErrorKind::EmailExists,
                "An account with this email already exists",
            ),
            "WEAK_PASSWORD" => Self::new(
                AuthErrorKind::WeakPassword,
                detail
                    .filter(|d| !d.is_empty())
                    .unwrap_or("Password should be at least 6 characters"),
            ),
            "INVALID_EMAIL" | "MISSING_EMAIL" => {
                Self::new(AuthErrorKind::InvalidEmail, "Invalid email address")
            }
            "USER_DISABLED" => {
                Self::new(AuthErrorKind::UserDisabled, "This account has been disabled")
            }
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::new(
                AuthErrorKind::TooManyAttempts,
                "Too many attempts, try again later",
            ),
            "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => Self::new(
                AuthErrorKind::SessionRevoked,
                "Your session has expired, please log in again",
            ),
            other => Self::new(
                AuthErrorKind::Provider,
                format!("Authentication failed: {other}"),
            ),
        }
    }
}
