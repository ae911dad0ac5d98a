//! # API crate: authentication core and the authenticated date request
//!
//! This crate holds everything the `ui` and `web` crates need that is not a Dioxus
//! component. It compiles for both WASM (the browser client) and native targets
//! (the server and the test-suite).
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | `IdentityProvider` seam, `AuthStore` (the single owner of the `Session`), Firebase and local providers, `AuthError` |
//! | [`config`] | — | `AppConfig` loaded from defaults, `config.toml` and `DATEAUTH__*` environment variables |
//! | [`date`] | — | `DateClient`, `FetchResult`, `FetchError` and the generation counter guarding stale results |
//! | [`models`] | — | `UserInfo` and `Session` |
//! | [`server`] | `server` | The `GET /api/date` axum route with bearer extraction and CORS |

pub mod auth;
pub mod config;
pub mod date;
pub mod models;
#[cfg(feature = "server")]
pub mod server;

pub use auth::{AuthError, AuthErrorKind, AuthStore, FirebaseAuth, IdentityProvider, LocalAuth};
pub use config::AppConfig;
pub use date::{run_date_fetch, DateClient, FetchError, FetchGeneration, FetchResult};
pub use models::{Session, UserInfo};
