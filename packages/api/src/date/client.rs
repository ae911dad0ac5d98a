//! HTTP client for the date endpoint.

use reqwest::Client;
use tracing::debug;

use super::FetchError;
use crate::auth::AuthStore;
use crate::config::ApiConfig;

#[derive(Debug, Clone)]
pub struct DateClient {
    http: Client,
    url: String,
}

impl DateClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.date_url())
    }

    /// Get a token from `auth`, then GET the date with it.
    pub async fn fetch_date(&self, auth: &AuthStore) -> Result<String, FetchError> {
        let token = auth.get_id_token().await.map_err(FetchError::Token)?;

        debug!(url = %self.url, "requesting date");
        let response = self
            .http
            .get(&self.url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

impl PartialEq for DateClient {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}
