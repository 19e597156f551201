//! HTTP page source for the scraper API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mutuals_core::config::ApiConfig;
use mutuals_core::relation::Relation;
use mutuals_util::errors::{MutualsError, ProviderError};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::auth::{self, ApiCredentials};
use crate::page::{Page, PageItem, PageRequest, PageSource};
use crate::paginate::PagedProvider;

/// Build a shared reqwest client for provider requests.
pub fn build_client(timeout: Duration) -> Result<Client, MutualsError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("mutuals/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| MutualsError::Config {
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// Client for the `/v1/followers` and `/v1/following` listings.
#[derive(Debug, Clone)]
pub struct ScraperClient {
    client: Client,
    base_url: String,
    credentials: ApiCredentials,
    in_flight: Arc<Semaphore>,
}

impl ScraperClient {
    pub fn new(client: Client, base_url: &str, credentials: ApiCredentials, max_in_flight: usize) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            in_flight: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Build a client from `[api]` settings.
    pub fn from_config(api: &ApiConfig) -> Result<Self, MutualsError> {
        let credentials = ApiCredentials::from_config(api)?;
        let client = build_client(Duration::from_secs(api.timeout_secs.max(1)))?;
        Ok(Self::new(
            client,
            &api.base_url(),
            credentials,
            api.max_in_flight,
        ))
    }

    /// Build the paginated provider the search runs against.
    pub fn provider_from_config(api: &ApiConfig) -> Result<PagedProvider<Self>, MutualsError> {
        Ok(PagedProvider::new(
            Self::from_config(api)?,
            api.effective_batch_size(),
        ))
    }

    /// Listing URL for a relation, e.g. `https://host/v1/following`.
    pub fn relation_url(&self, relation: Relation) -> String {
        format!("{}/v1/{}", self.base_url, relation.api_segment())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    data: Option<ListingData>,
    #[serde(default)]
    pagination_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
}

impl ListingResponse {
    fn into_page(self) -> Page {
        let data = self.data.unwrap_or_default();
        let items = data
            .items
            .unwrap_or_default()
            .iter()
            .map(|item| PageItem {
                username: item
                    .get("username")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            })
            .collect();
        Page {
            count: data.count,
            items,
            next_token: self.pagination_token,
        }
    }
}

#[async_trait]
impl PageSource for ScraperClient {
    async fn page(&self, request: PageRequest<'_>) -> Result<Page, ProviderError> {
        let url = self.relation_url(request.relation);

        let mut query: Vec<(&str, String)> = vec![
            ("username_or_id_or_url", request.user.to_string()),
            ("amount", request.amount.to_string()),
        ];
        if let Some(token) = request.token {
            query.push(("pagination_token", token.to_string()));
        }

        let _permit = self
            .in_flight
            .acquire()
            .await
            .map_err(|e| ProviderError::Transport {
                url: url.clone(),
                message: format!("request limiter closed: {e}"),
            })?;

        debug!(
            "GET {url} user={} amount={} token={}",
            request.user,
            request.amount,
            request.token.unwrap_or("-")
        );

        let req = auth::apply_auth(self.client.get(&url).query(&query), &self.credentials);
        let resp = req.send().await.map_err(|e| ProviderError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body: ListingResponse = resp.json().await.map_err(|e| ProviderError::Decode {
            message: format!("{url}: {e}"),
        })?;
        Ok(body.into_page())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ScraperClient {
        ScraperClient::new(
            Client::new(),
            base,
            ApiCredentials {
                host: "h".into(),
                key: "k".into(),
            },
            1,
        )
    }

    #[test]
    fn relation_urls() {
        let c = client("https://api.example.com/");
        assert_eq!(
            c.relation_url(Relation::Followers),
            "https://api.example.com/v1/followers"
        );
        assert_eq!(
            c.relation_url(Relation::Followings),
            "https://api.example.com/v1/following"
        );
    }

    #[test]
    fn listing_without_data_is_empty_page() {
        let body: ListingResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_page(), Page::default());
    }

    #[test]
    fn listing_items_without_username_are_kept_as_unnamed() {
        let body: ListingResponse = serde_json::from_str(
            r#"{"data": {"count": 3, "items": [{"username": "a"}, {"id": 7}, {"username": 5}]},
                "pagination_token": "next"}"#,
        )
        .unwrap();
        let page = body.into_page();
        assert_eq!(page.count, Some(3));
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.usernames().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(page.continuation(), Some("next"));
    }

    #[test]
    fn provider_from_config_needs_key() {
        assert!(ScraperClient::provider_from_config(&ApiConfig::default()).is_err());
    }
}
