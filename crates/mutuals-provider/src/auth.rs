//! Scraper API authentication headers.
//!
//! The key and host are read from the global configuration (or the
//! `MUTUALS_API_KEY` / `MUTUALS_API_HOST` environment variables) when the
//! client is built, so this module just attaches them to each request.

use mutuals_core::config::ApiConfig;
use mutuals_util::errors::MutualsError;
use reqwest::RequestBuilder;

pub const HOST_HEADER: &str = "x-rapidapi-host";
pub const KEY_HEADER: &str = "x-rapidapi-key";

/// Credentials attached to every provider request.
#[derive(Clone)]
pub struct ApiCredentials {
    pub host: String,
    pub key: String,
}

impl ApiCredentials {
    /// Extract credentials from `[api]`, failing when no key is set.
    pub fn from_config(api: &ApiConfig) -> Result<Self, MutualsError> {
        let key = api.require_key()?;
        Ok(Self {
            host: api.host.clone(),
            key: key.to_string(),
        })
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("host", &self.host)
            .field("key", &"********")
            .finish()
    }
}

/// Apply the host and key headers to a request.
pub fn apply_auth(request: RequestBuilder, credentials: &ApiCredentials) -> RequestBuilder {
    request
        .header(HOST_HEADER, &credentials.host)
        .header(KEY_HEADER, &credentials.key)
}
