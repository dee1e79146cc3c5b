//! Upload session
//!
//! Owns everything one upload flow needs: the resolved catalog, the chosen
//! image and the form text. Methods take `&mut self` and only write state
//! after each relay call has completed, so dropping a pending call leaves
//! the session as it was.

use tracing::{info, warn};

use crate::config::Settings;
use crate::domain::{AssemblyInput, PlacementOverride, ProductDraft, ResolvedCatalog, ShippingMethod};
use crate::engine::{ImagePreparer, PreparedImage};
use crate::providers::printify::models::{CreatedProduct, ImageUploadRequest};

use super::client::RelayApi;
use super::error::{WorkflowError, WorkflowResult};
use super::resolver::CatalogResolver;

/// User-editable part of the session
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    pub background: Option<String>,
    pub placement: PlacementOverride,
    pub shipping_method: ShippingMethod,
    pub image: Option<PreparedImage>,
}

/// Assembled payload plus its validation messages, nothing sent
#[derive(Debug, Clone)]
pub struct DryRun {
    pub draft: ProductDraft,
    pub messages: Vec<String>,
}

/// One upload flow against one shop
pub struct UploadSession<'a, A: RelayApi + ?Sized> {
    api: &'a A,
    shop_id: String,
    preparer: ImagePreparer,
    resolver: CatalogResolver,
    pub form: UploadForm,
}

impl<'a, A: RelayApi + ?Sized> UploadSession<'a, A> {
    pub fn new(api: &'a A, shop_id: impl Into<String>, settings: &Settings) -> Self {
        UploadSession {
            api,
            shop_id: shop_id.into(),
            preparer: ImagePreparer::from_settings(&settings.image),
            resolver: CatalogResolver::from_settings(&settings.catalog),
            form: UploadForm {
                background: Some(settings.client.default_background.clone()).filter(|b| !b.is_empty()),
                ..Default::default()
            },
        }
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    /// Resolve the canvas catalog for this shop
    pub async fn initialize(&mut self) -> WorkflowResult<&ResolvedCatalog> {
        info!(shop_id = %self.shop_id, "Resolving canvas catalog");
        self.resolver.resolve(self.api).await
    }

    pub fn catalog(&self) -> Option<&ResolvedCatalog> {
        self.resolver.resolved()
    }

    /// Prepare and hold an image; a rejected image leaves the previous one in place
    pub fn select_image(&mut self, data: &[u8], file_name: &str) -> WorkflowResult<&PreparedImage> {
        let prepared = self.preparer.prepare(data, file_name)?;
        Ok(self.form.image.insert(prepared))
    }

    /// Build the payload for the current form and catalog
    fn assemble(&self, image_id: &str) -> ProductDraft {
        let catalog = self.resolver.resolved();

        ProductDraft::assemble(AssemblyInput {
            title: &self.form.title,
            description: &self.form.description,
            blueprint_id: catalog.map(|c| c.blueprint.id),
            print_provider_id: catalog.map(|c| c.provider.id),
            variants: catalog.map(|c| c.variants.as_slice()).unwrap_or(&[]),
            image_id,
            background: self.form.background.as_deref(),
            placement: self.form.placement,
            shipping_method: Some(self.form.shipping_method),
        })
    }

    /// Assemble and validate without uploading anything
    pub fn dry_run(&self) -> DryRun {
        let draft = self.assemble("");
        let mut messages = draft.validate();
        if self.form.image.is_none() {
            messages.push("Image is required".to_string());
        }
        DryRun { draft, messages }
    }

    /// Validate, upload the image, create the product and reset the form
    pub async fn submit(&mut self) -> WorkflowResult<CreatedProduct> {
        let DryRun { mut draft, messages } = self.dry_run();
        let image = match (&self.form.image, messages.is_empty()) {
            (Some(image), true) => image,
            _ => {
                warn!(errors = ?messages, "Product draft rejected");
                return Err(WorkflowError::Validation(messages));
            }
        };

        let request = ImageUploadRequest {
            file_name: image.file_name.clone(),
            contents: image.base64_contents(),
        };
        let uploaded = self.api.upload_image(&request).await?;
        if uploaded.id.is_empty() {
            return Err(WorkflowError::InvalidResponse("upload response has no image id".to_string()));
        }
        info!(image_id = %uploaded.id, "Image uploaded");

        draft.set_image_id(&uploaded.id);
        let created = self.api.create_product(&self.shop_id, &draft).await?;
        info!(product_id = %created.id, shop_id = %self.shop_id, "Product created");

        // The catalog stays resolved for the next product
        self.form.image = None;
        self.form.title.clear();
        self.form.description.clear();

        Ok(created)
    }
}
