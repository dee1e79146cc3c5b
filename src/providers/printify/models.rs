//! Printify API Models
//!
//! Wire shapes exchanged with the Printify API and echoed by the relay.
//! Catalog entries (blueprints, providers, variants) live in
//! `crate::domain::catalog`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Envelopes
// ============================================================================

/// `{data: ...}` wrapper used for list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Generic error body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// Body returned when the accepted provider is not offered for a blueprint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderNotFoundBody {
    pub message: String,
    pub available_providers: Vec<String>,
}

/// Body returned when a provider lists no usable variants
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoVariantsBody {
    pub message: String,
    pub error: String,
}

// ============================================================================
// Shops
// ============================================================================

/// Merchant shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub sales_channel: Option<String>,
}

// ============================================================================
// Uploads
// ============================================================================

/// Image upload request (`POST /v1/uploads/images.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageUploadRequest {
    pub file_name: String,
    /// Base64-encoded file contents
    pub contents: String,
}

/// Uploaded image as acknowledged by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

// ============================================================================
// Products
// ============================================================================

/// Product as returned after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Product preview image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub src: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Product entry of the shop listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub print_provider_id: Option<u64>,
    #[serde(default)]
    pub blueprint_id: Option<u64>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// One page of `GET /v1/shops/{id}/products.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default)]
    pub data: Vec<ProductSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub last_page: Option<u32>,
}

fn default_page() -> u32 { 1 }
