//! In-memory relay used by the workflow unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    Blueprint, PrintProvider, ProductDraft, ShippingInfo, ShippingProfile, Variant, VariantOptions,
    CANVAS_BLUEPRINT_TITLE,
};
use crate::providers::printify::models::{
    CreatedProduct, ImageUploadRequest, ProductPage, ProductSummary, Shop, UploadedImage,
};

use super::client::RelayApi;
use super::error::{WorkflowError, WorkflowResult};

pub struct FakeRelay {
    pub blueprints: Vec<Blueprint>,
    pub providers: Vec<PrintProvider>,
    pub variants: HashMap<String, Variant>,
    pub shipping: ShippingInfo,
    /// Answer the shipping lookup with a 500
    pub fail_shipping: bool,
    pub upload_id: String,
    pub products: Vec<ProductSummary>,
    pub uploads: Mutex<Vec<ImageUploadRequest>>,
    pub created: Mutex<Vec<ProductDraft>>,
    pub page_requests: Mutex<Vec<(u32, u32)>>,
}

pub fn variant(id: u64, size: &str) -> Variant {
    Variant {
        id,
        title: format!("{} / 1.25\"", size),
        options: VariantOptions {
            size: Some(size.to_string()),
            ..Default::default()
        },
        price: None,
    }
}

pub fn product(id: &str, title: &str, provider: u64, visible: bool) -> ProductSummary {
    ProductSummary {
        id: id.to_string(),
        title: title.to_string(),
        print_provider_id: Some(provider),
        blueprint_id: Some(42),
        visible,
        images: Vec::new(),
    }
}

impl FakeRelay {
    /// Blueprint 42 from Jondo (7) offering a 6" and an 8" canvas
    pub fn canvas() -> Self {
        let mut variants = HashMap::new();
        variants.insert("a".to_string(), variant(101, "6\" x 6\""));
        variants.insert("b".to_string(), variant(102, "8\" x 8\""));

        FakeRelay {
            blueprints: vec![
                Blueprint { id: 3, title: "Poster".to_string(), brand: None, model: None },
                Blueprint { id: 42, title: CANVAS_BLUEPRINT_TITLE.to_string(), brand: None, model: None },
            ],
            providers: vec![PrintProvider { id: 7, title: "Jondo".to_string() }],
            variants,
            shipping: ShippingInfo {
                standard: ShippingProfile { first_item: 999, additional_items: 499, handling_time: 3 },
                express: ShippingProfile::default(),
            },
            fail_shipping: false,
            upload_id: "img-1".to_string(),
            products: Vec::new(),
            uploads: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RelayApi for FakeRelay {
    async fn shops(&self) -> WorkflowResult<Vec<Shop>> {
        Ok(vec![Shop { id: 1, title: "Gallery".to_string(), sales_channel: None }])
    }

    async fn blueprints(&self) -> WorkflowResult<Vec<Blueprint>> {
        Ok(self.blueprints.clone())
    }

    async fn print_providers(&self, _blueprint_id: u64) -> WorkflowResult<Vec<PrintProvider>> {
        Ok(self.providers.clone())
    }

    async fn variants(&self, _blueprint_id: u64, _provider_id: u64) -> WorkflowResult<HashMap<String, Variant>> {
        Ok(self.variants.clone())
    }

    async fn shipping(&self, _blueprint_id: u64, _provider_id: u64) -> WorkflowResult<ShippingInfo> {
        if self.fail_shipping {
            return Err(WorkflowError::Upstream {
                status: 500,
                body: serde_json::json!({ "message": "Server error" }),
            });
        }
        Ok(self.shipping.clone())
    }

    async fn upload_image(&self, request: &ImageUploadRequest) -> WorkflowResult<UploadedImage> {
        self.uploads.lock().unwrap().push(request.clone());
        Ok(UploadedImage {
            id: self.upload_id.clone(),
            file_name: Some(request.file_name.clone()),
            width: None,
            height: None,
            preview_url: None,
        })
    }

    async fn create_product(&self, shop_id: &str, draft: &ProductDraft) -> WorkflowResult<CreatedProduct> {
        if shop_id == "missing" {
            return Err(WorkflowError::Upstream {
                status: 404,
                body: serde_json::json!({ "message": "Shop not found" }),
            });
        }
        self.created.lock().unwrap().push(draft.clone());
        Ok(CreatedProduct { id: "prod-1".to_string(), title: Some(draft.title.clone()) })
    }

    async fn products(&self, _shop_id: &str, page: u32, limit: u32) -> WorkflowResult<ProductPage> {
        self.page_requests.lock().unwrap().push((page, limit));
        let start = ((page.max(1) - 1) * limit) as usize;
        let data = self.products.iter().skip(start).take(limit as usize).cloned().collect();
        Ok(ProductPage {
            current_page: page,
            data,
            total: self.products.len() as u64,
            last_page: None,
        })
    }
}
