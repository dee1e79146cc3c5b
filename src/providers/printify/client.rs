//! Printify API Client Implementation
//!
//! Forwards relay calls to the Printify REST API with the bearer credential
//! attached. Every call is a single attempt; non-2xx answers come back as
//! [`ProviderError::ApiError`] with the upstream body untouched.
//!
//! API Docs: https://developers.printify.com/

use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::UpstreamSettings;
use crate::providers::http_client::{RateLimitedClient, RateLimitedRequestBuilder};
use crate::providers::traits::{ProviderCredentials, ProviderError, ProviderResult};

/// Raw successful upstream response
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UpstreamBody {
    /// Parse the body as JSON
    pub fn json(&self) -> ProviderResult<Value> {
        serde_json::from_slice(&self.bytes).map_err(|e| {
            let text = String::from_utf8_lossy(&self.bytes);
            ProviderError::ParseError(format!(
                "JSON parse error: {} - Body: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }
}

/// Printify API client
pub struct PrintifyClient {
    /// Throttled HTTP client
    client: RateLimitedClient,

    /// Bearer credential
    credentials: ProviderCredentials,

    /// API base URL
    base_url: Url,
}

impl PrintifyClient {
    /// Create a new client from upstream settings
    pub fn new(settings: &UpstreamSettings) -> ProviderResult<Self> {
        let credentials = ProviderCredentials::from_settings(settings)?;
        let client = RateLimitedClient::new(
            settings.rate_limit_per_minute,
            Duration::from_secs(settings.timeout_secs.max(1)),
        )?;

        Ok(PrintifyClient {
            client,
            credentials,
            base_url: Url::parse(&settings.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ProviderResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a request and split success from upstream failure
    async fn forward(&self, request: RateLimitedRequestBuilder<'_>) -> ProviderResult<UpstreamBody> {
        let response = request
            .bearer_auth(self.credentials.access_token())
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Printify returned an error status");
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body: bytes,
                content_type,
            });
        }

        Ok(UpstreamBody {
            status: status.as_u16(),
            content_type,
            bytes,
        })
    }

    /// Authenticated GET
    pub async fn get(&self, path: &str) -> ProviderResult<UpstreamBody> {
        let url = self.url(path)?;
        debug!(url = %url, "Printify API request");
        self.forward(self.client.get(url)).await
    }

    /// Authenticated GET with query parameters
    pub async fn get_with_query(&self, path: &str, query: &[(&str, String)]) -> ProviderResult<UpstreamBody> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        debug!(url = %url, "Printify API request");
        self.forward(self.client.get(url)).await
    }

    /// Authenticated JSON POST
    pub async fn post_json(&self, path: &str, body: &Value) -> ProviderResult<UpstreamBody> {
        let url = self.url(path)?;
        debug!(url = %url, "Printify API request");
        self.forward(self.client.post(url).json(body)).await
    }

    // ------------------------------------------------------------------------
    // Routes
    // ------------------------------------------------------------------------

    pub async fn shops(&self) -> ProviderResult<UpstreamBody> {
        self.get("/v1/shops.json").await
    }

    pub async fn upload_image(&self, body: &Value) -> ProviderResult<UpstreamBody> {
        self.post_json("/v1/uploads/images.json", body).await
    }

    pub async fn create_product(&self, shop_id: &str, body: &Value) -> ProviderResult<UpstreamBody> {
        self.post_json(&format!("/v1/shops/{}/products.json", segment(shop_id)), body).await
    }

    pub async fn products(&self, shop_id: &str, page: Option<u32>, limit: Option<u32>) -> ProviderResult<UpstreamBody> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.get_with_query(&format!("/v1/shops/{}/products.json", segment(shop_id)), &query).await
    }

    pub async fn blueprints(&self) -> ProviderResult<UpstreamBody> {
        self.get("/v1/catalog/blueprints.json").await
    }

    pub async fn blueprint(&self, blueprint_id: &str) -> ProviderResult<UpstreamBody> {
        self.get(&format!("/v1/catalog/blueprints/{}.json", segment(blueprint_id))).await
    }

    pub async fn blueprint_providers(&self, blueprint_id: &str) -> ProviderResult<UpstreamBody> {
        self.get(&format!("/v1/catalog/blueprints/{}/print_providers.json", segment(blueprint_id))).await
    }

    pub async fn variants(&self, blueprint_id: &str, provider_id: &str) -> ProviderResult<UpstreamBody> {
        self.get(&format!(
            "/v1/catalog/blueprints/{}/print_providers/{}/variants.json",
            segment(blueprint_id),
            segment(provider_id)
        ))
        .await
    }

    pub async fn shipping(&self, blueprint_id: &str, provider_id: &str) -> ProviderResult<UpstreamBody> {
        self.get(&format!(
            "/v1/catalog/blueprints/{}/print_providers/{}/shipping.json",
            segment(blueprint_id),
            segment(provider_id)
        ))
        .await
    }

    pub async fn print_providers(&self) -> ProviderResult<UpstreamBody> {
        self.get("/v1/catalog/print_providers.json").await
    }
}

/// Percent-encode a caller-supplied path segment
fn segment(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(token: &str) -> UpstreamSettings {
        UpstreamSettings {
            base_url: "https://api.printify.com".to_string(),
            api_token: token.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_requires_token() {
        assert!(matches!(PrintifyClient::new(&settings("")), Err(ProviderError::NotConfigured(_))));
    }

    #[test]
    fn test_client_creation() {
        let client = PrintifyClient::new(&settings("token")).unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.printify.com/");
        assert_eq!(
            client.url("/v1/shops.json").unwrap().as_str(),
            "https://api.printify.com/v1/shops.json"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(segment("123"), "123");
        assert_eq!(segment("../shops"), "%2E%2E%2Fshops");
    }

    #[test]
    fn test_upstream_body_json_error_is_truncated() {
        let body = UpstreamBody {
            status: 200,
            content_type: None,
            bytes: Bytes::from(vec![b'x'; 2000]),
        };
        match body.json() {
            Err(ProviderError::ParseError(message)) => assert!(message.len() < 700),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
