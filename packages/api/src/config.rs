//! # Application configuration
//!
//! [`AppConfig`] has three sections: `auth` (which identity provider and how to reach
//! it), `api` (where the date endpoint lives) and `server` (backend policy).
//!
//! Native builds layer built-in defaults, an optional `config.toml`, and environment
//! variables prefixed `DATEAUTH` with `__` separating path segments
//! (`DATEAUTH__AUTH__API_KEY=...`, `DATEAUTH__SERVER__REQUIRE_AUTH=false`). A `.env`
//! file is read first through `dotenvy`. WASM builds have no environment at runtime,
//! so they take the same keys from the build environment (`DATEAUTH_AUTH_PROVIDER`,
//! `DATEAUTH_AUTH_API_KEY`, `DATEAUTH_API_BASE_URL`) and default `api.base_url` to the
//! page origin.

use config::{Config, ConfigError};
use serde::Deserialize;

pub const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://securetoken.googleapis.com/v1";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_DATE_PATH: &str = "/api/date";

/// Which identity provider backs the session.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Firebase,
    #[default]
    Local,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    pub auth_endpoint: String,
    pub token_endpoint: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Local,
            api_key: String::new(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.into(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub date_path: String,
}

impl ApiConfig {
    pub fn date_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.date_path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            date_path: DEFAULT_DATE_PATH.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Reject `/api/date` requests that carry no bearer token.
    pub require_auth: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { require_auth: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub api: ApiConfig,
    pub server: ServerConfig,
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let default = AppConfig::default();
    Config::builder()
        .set_default("auth.provider", "local")?
        .set_default("auth.api_key", default.auth.api_key)?
        .set_default("auth.auth_endpoint", default.auth.auth_endpoint)?
        .set_default("auth.token_endpoint", default.auth.token_endpoint)?
        .set_default("api.base_url", default.api.base_url)?
        .set_default("api.date_path", default.api.date_path)?
        .set_default("server.require_auth", default.server.require_auth)
}

impl AppConfig {
    /// Load configuration for this process.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from("config", "DATEAUTH")
    }

    /// Defaults, then `{file}.toml` if present, then `{prefix}__*` variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(file: &str, prefix: &str) -> Result<Self, ConfigError> {
        use config::{Environment, File, FileFormat};

        defaults()?
            .add_source(File::with_name(file).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        let origin = web_sys::window().and_then(|window| window.location().origin().ok());
        Self::from_build_values(
            option_env!("DATEAUTH_AUTH_PROVIDER"),
            option_env!("DATEAUTH_AUTH_API_KEY"),
            option_env!("DATEAUTH_API_BASE_URL").map(str::to_string).or(origin),
        )
    }

    /// Defaults overridden by values baked in at build time. Used by browser builds,
    /// which have no process environment or config file.
    pub fn from_build_values(
        provider: Option<&str>,
        api_key: Option<&str>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        defaults()?
            .set_override_option("auth.provider", provider)?
            .set_override_option("auth.api_key", api_key)?
            .set_override_option("api.base_url", base_url)?
            .build()?
            .try_deserialize()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::env::set_var;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_from("does-not-exist", "DATEAUTH_TEST_DEFAULTS").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.date_url(), "http://localhost:8080/api/date");
        assert!(config.server.require_auth);
    }

    #[test]
    fn test_environment_overrides() {
        set_var("DATEAUTH_TEST_ENV__AUTH__PROVIDER", "firebase");
        set_var("DATEAUTH_TEST_ENV__AUTH__API_KEY", "abc123");
        set_var("DATEAUTH_TEST_ENV__API__BASE_URL", "https://dates.example.com/");
        set_var("DATEAUTH_TEST_ENV__SERVER__REQUIRE_AUTH", "false");

        let config = AppConfig::load_from("does-not-exist", "DATEAUTH_TEST_ENV").unwrap();

        assert_eq!(config.auth.provider, ProviderKind::Firebase);
        assert_eq!(config.auth.api_key, "abc123");
        assert_eq!(config.auth.auth_endpoint, DEFAULT_AUTH_ENDPOINT);
        assert_eq!(config.api.date_url(), "https://dates.example.com/api/date");
        assert!(!config.server.require_auth);
    }

    #[test]
    fn test_build_values_override_defaults() {
        let config = AppConfig::from_build_values(
            Some("firebase"),
            Some("abc123"),
            Some("https://app.example.com".into()),
        )
        .unwrap();

        assert_eq!(config.auth.provider, ProviderKind::Firebase);
        assert_eq!(config.auth.api_key, "abc123");
        assert_eq!(config.api.date_url(), "https://app.example.com/api/date");
        assert!(config.server.require_auth);
    }

    #[test]
    fn test_missing_build_values_keep_defaults() {
        let config = AppConfig::from_build_values(None, None, None).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
