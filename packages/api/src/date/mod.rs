//! # Authenticated date request
//!
//! The dashboard shows one value from the backend: the server's date, fetched from
//! `GET /api/date` with `Authorization: Bearer <token>`.
//!
//! - [`DateClient`] performs the request: token first, then the GET.
//! - [`FetchResult`] is what the view renders: loading, the date, or an error line.
//! - [`FetchGeneration`] guards against results landing after the view moved on.
//! - [`run_date_fetch`] ties the three together for one mount.

mod client;
mod generation;

pub use client::DateClient;
pub use generation::{FetchGeneration, FetchTicket};

use tracing::{debug, warn};

use crate::auth::{AuthError, AuthStore};

/// Outcome of the date request. Exactly one state holds at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchResult {
    #[default]
    Loading,
    Loaded(String),
    Failed(String),
}

impl FetchResult {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<String, FetchError>> for FetchResult {
    fn from(result: Result<String, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No bearer token could be obtained; no request was sent.
    #[error("Error fetching date: {0}")]
    Token(#[source] AuthError),
    #[error("Error fetching date: {0}")]
    Network(String),
    /// The endpoint answered with a non-2xx status. The body is discarded.
    #[error("Failed to fetch date from API")]
    Status(u16),
}

/// Run one date fetch for a mounted view.
///
/// `apply` receives [`FetchResult::Loading`] immediately and the terminal result once
/// the request settles, unless `generation` moved on in the meantime. Returns whether
/// the terminal result was applied.
pub async fn run_date_fetch(
    client: &DateClient,
    auth: &AuthStore,
    generation: &FetchGeneration,
    mut apply: impl FnMut(FetchResult),
) -> bool {
    let ticket = generation.begin();
    apply(FetchResult::Loading);

    let result = client.fetch_date(auth).await;
    if !ticket.is_current() {
        debug!("discarding stale date result");
        return false;
    }
    if let Err(err) = &result {
        warn!(error = %err, "date request failed");
    }
    apply(result.into());
    true
}
