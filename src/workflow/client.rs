//! Relay client
//!
//! The workflow never talks to the printing API directly. [`RelayApi`] is the
//! seam between the workflow and the relay; [`RelayClient`] implements it
//! over HTTP.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientSettings;
use crate::domain::{Blueprint, PrintProvider, ProductDraft, ShippingInfo, Variant};
use crate::providers::printify::models::{
    CreatedProduct, DataEnvelope, ImageUploadRequest, ProductPage, Shop, UploadedImage,
};

use super::error::{WorkflowError, WorkflowResult};

/// Relay operations the workflow depends on
#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn shops(&self) -> WorkflowResult<Vec<Shop>>;

    async fn blueprints(&self) -> WorkflowResult<Vec<Blueprint>>;

    /// Providers of a blueprint, already narrowed to the accepted one
    async fn print_providers(&self, blueprint_id: u64) -> WorkflowResult<Vec<PrintProvider>>;

    /// Variants keyed by opaque id; key order carries no meaning
    async fn variants(&self, blueprint_id: u64, provider_id: u64) -> WorkflowResult<HashMap<String, Variant>>;

    async fn shipping(&self, blueprint_id: u64, provider_id: u64) -> WorkflowResult<ShippingInfo>;

    async fn upload_image(&self, request: &ImageUploadRequest) -> WorkflowResult<UploadedImage>;

    async fn create_product(&self, shop_id: &str, draft: &ProductDraft) -> WorkflowResult<CreatedProduct>;

    /// One page of a shop's products
    async fn products(&self, shop_id: &str, page: u32, limit: u32) -> WorkflowResult<ProductPage>;
}

/// HTTP client for the relay
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    base_url: Url,
}

impl RelayClient {
    /// Create a client for the relay's `/api` base URL
    pub fn new(relay_url: &str) -> WorkflowResult<Self> {
        // Url::join drops the last segment unless the base ends with a slash
        let base_url = if relay_url.ends_with('/') {
            Url::parse(relay_url)?
        } else {
            Url::parse(&format!("{}/", relay_url))?
        };

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("canvas-relay-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(RelayClient { client, base_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> WorkflowResult<Self> {
        Self::new(&settings.relay_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> WorkflowResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json(&self, url: Url) -> WorkflowResult<Value> {
        debug!(url = %url, "Relay request");
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn post_json<B: serde::Serialize + ?Sized + Sync>(&self, url: Url, body: &B) -> WorkflowResult<Value> {
        debug!(url = %url, "Relay request");
        let response = self.client.post(url).json(body).send().await?;
        read_json(response).await
    }
}

/// Message of the relay's 404 when a provider lists no usable variants
const NO_VALID_VARIANTS: &str = "No valid variants found";

/// Products path of a shop, with the id kept inside its own segment
///
/// Encoded dots still count as `.`/`..` when a URL is resolved, so
/// dot-only ids are refused outright.
fn shop_products_path(shop_id: &str) -> WorkflowResult<String> {
    if shop_id.is_empty() || shop_id.chars().all(|c| c == '.') {
        return Err(WorkflowError::Validation(vec![format!("Invalid shop ID: {:?}", shop_id)]));
    }
    Ok(format!("shops/{}/products", utf8_percent_encode(shop_id, NON_ALPHANUMERIC)))
}

/// Parse a relay response, turning non-2xx answers into `Upstream`
async fn read_json(response: Response) -> WorkflowResult<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    if !status.is_success() {
        warn!(status = status.as_u16(), "Relay returned an error status");
        return Err(WorkflowError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

fn parse<T: DeserializeOwned>(value: Value, what: &str) -> WorkflowResult<T> {
    serde_json::from_value(value).map_err(|e| WorkflowError::InvalidResponse(format!("{}: {}", what, e)))
}

/// `{data: ...}` if present, else the whole body
fn data_or_body(mut value: Value) -> Value {
    match value.get_mut("data") {
        Some(data) => data.take(),
        None => value,
    }
}

#[async_trait]
impl RelayApi for RelayClient {
    async fn shops(&self) -> WorkflowResult<Vec<Shop>> {
        let body = self.get_json(self.url("shops")?).await?;
        let envelope: DataEnvelope<Vec<Shop>> = parse(body, "shops")?;
        Ok(envelope.data)
    }

    async fn blueprints(&self) -> WorkflowResult<Vec<Blueprint>> {
        let body = self.get_json(self.url("catalog")?).await?;
        let envelope: DataEnvelope<Vec<Blueprint>> = parse(body, "catalog")?;
        Ok(envelope.data)
    }

    async fn print_providers(&self, blueprint_id: u64) -> WorkflowResult<Vec<PrintProvider>> {
        let url = self.url(&format!("catalog/{}/print_providers", blueprint_id))?;

        match self.get_json(url).await {
            Ok(body) => {
                let envelope: DataEnvelope<Vec<PrintProvider>> = parse(body, "print providers")?;
                Ok(envelope.data)
            }
            Err(WorkflowError::Upstream { status: 404, body }) if body.get("available_providers").is_some() => {
                let available = body["available_providers"]
                    .as_array()
                    .map(|names| names.iter().filter_map(Value::as_str).map(str::to_string).collect())
                    .unwrap_or_default();
                Err(WorkflowError::ProviderNotFound { available })
            }
            Err(e) => Err(e),
        }
    }

    async fn variants(&self, blueprint_id: u64, provider_id: u64) -> WorkflowResult<HashMap<String, Variant>> {
        let url = self.url(&format!("catalog/{}/print_providers/{}/variants", blueprint_id, provider_id))?;

        let body = match self.get_json(url).await {
            Ok(body) => body,
            // The relay's own 404 for "nothing usable left"; upstream 404s stay errors
            Err(WorkflowError::Upstream { status: 404, body })
                if body.get("message").and_then(Value::as_str) == Some(NO_VALID_VARIANTS) =>
            {
                return Ok(HashMap::new())
            }
            Err(e) => return Err(e),
        };

        let raw: HashMap<String, Value> = parse(data_or_body(body), "variants")?;
        let variants = raw
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<Variant>(value) {
                Ok(variant) => Some((key, variant)),
                Err(e) => {
                    debug!(key = %key, error = %e, "Skipping unreadable variant");
                    None
                }
            })
            .collect();

        Ok(variants)
    }

    async fn shipping(&self, blueprint_id: u64, provider_id: u64) -> WorkflowResult<ShippingInfo> {
        let url = self.url(&format!("catalog/{}/print_providers/{}/shipping", blueprint_id, provider_id))?;
        let body = self.get_json(url).await?;

        // Missing or differently shaped tables read as zero rates
        Ok(serde_json::from_value(data_or_body(body)).unwrap_or_default())
    }

    async fn upload_image(&self, request: &ImageUploadRequest) -> WorkflowResult<UploadedImage> {
        let body = self.post_json(self.url("uploads/images")?, request).await?;
        parse(body, "upload")
    }

    async fn create_product(&self, shop_id: &str, draft: &ProductDraft) -> WorkflowResult<CreatedProduct> {
        let url = self.url(&shop_products_path(shop_id)?)?;
        let body = self.post_json(url, draft).await?;
        parse(body, "created product")
    }

    async fn products(&self, shop_id: &str, page: u32, limit: u32) -> WorkflowResult<ProductPage> {
        let mut url = self.url(&shop_products_path(shop_id)?)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let body = self.get_json(url).await?;
        parse(body, "products")
    }
}
