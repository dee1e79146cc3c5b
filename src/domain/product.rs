//! Product draft assembly and validation
//!
//! A [`ProductDraft`] is the product-creation payload in the shape the
//! printing API expects. It is built fresh for every submission attempt and
//! never stored locally.

use serde::{Deserialize, Serialize};

use super::catalog::{ShippingMethod, Variant};

/// Print position used for the single canvas print area
pub const FRONT_POSITION: &str = "front";

/// Variant entry of a product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftVariant {
    pub id: u64,
    pub price: Option<u32>,
    pub is_enabled: bool,
}

/// Image placement inside a placeholder, in relative coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub angle: f64,
}

impl ImagePlacement {
    /// Centered, unscaled, unrotated
    pub fn centered(image_id: impl Into<String>) -> Self {
        ImagePlacement {
            id: image_id.into(),
            x: 0.5,
            y: 0.5,
            scale: 1.0,
            angle: 0.0,
        }
    }
}

/// Optional geometry override for the uploaded image
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlacementOverride {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub angle: Option<f64>,
}

impl PlacementOverride {
    fn apply(&self, mut placement: ImagePlacement) -> ImagePlacement {
        placement.x = self.x.unwrap_or(placement.x);
        placement.y = self.y.unwrap_or(placement.y);
        placement.scale = self.scale.unwrap_or(placement.scale);
        placement.angle = self.angle.unwrap_or(placement.angle);
        placement
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub position: String,
    pub images: Vec<ImagePlacement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    pub position: String,
    pub variant_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub placeholders: Vec<Placeholder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintDetails {
    pub format: String,
    pub print_on_side: String,
}

impl Default for PrintDetails {
    fn default() -> Self {
        PrintDetails {
            format: "jpg".to_string(),
            print_on_side: "regular".to_string(),
        }
    }
}

/// Product-creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub blueprint_id: Option<u64>,
    pub print_provider_id: Option<u64>,
    pub variants: Vec<DraftVariant>,
    pub print_areas: Vec<PrintArea>,
    pub print_details: PrintDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<ShippingMethod>,
}

/// Inputs of [`ProductDraft::assemble`]
#[derive(Debug, Clone)]
pub struct AssemblyInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub blueprint_id: Option<u64>,
    pub print_provider_id: Option<u64>,
    pub variants: &'a [Variant],
    pub image_id: &'a str,
    pub background: Option<&'a str>,
    pub placement: PlacementOverride,
    pub shipping_method: Option<ShippingMethod>,
}

impl ProductDraft {
    /// Merge resolved catalog data, text fields and the image reference
    /// into a payload with one front print area covering every variant
    pub fn assemble(input: AssemblyInput<'_>) -> Self {
        let variants: Vec<DraftVariant> = input
            .variants
            .iter()
            .map(|v| DraftVariant {
                id: v.id,
                price: v.price,
                is_enabled: true,
            })
            .collect();

        let image = input.placement.apply(ImagePlacement::centered(input.image_id));

        let print_area = PrintArea {
            position: FRONT_POSITION.to_string(),
            variant_ids: variants.iter().map(|v| v.id).collect(),
            background: input.background.map(str::to_string),
            placeholders: vec![Placeholder {
                position: FRONT_POSITION.to_string(),
                images: vec![image],
            }],
        };

        ProductDraft {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            blueprint_id: input.blueprint_id,
            print_provider_id: input.print_provider_id,
            variants,
            print_areas: vec![print_area],
            print_details: PrintDetails::default(),
            shipping_method: input.shipping_method,
        }
    }

    /// Point every placeholder image at an uploaded image id
    pub fn set_image_id(&mut self, image_id: &str) {
        for image in self
            .print_areas
            .iter_mut()
            .flat_map(|area| area.placeholders.iter_mut())
            .flat_map(|placeholder| placeholder.images.iter_mut())
        {
            image.id = image_id.to_string();
        }
    }

    /// Collect every shape problem; an empty list means submittable
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        }
        if self.blueprint_id.unwrap_or(0) == 0 {
            errors.push("Blueprint ID is required".to_string());
        }
        if self.print_provider_id.unwrap_or(0) == 0 {
            errors.push("Print provider ID is required".to_string());
        }

        if self.variants.is_empty() {
            errors.push("At least one variant is required".to_string());
        }
        for (index, variant) in self.variants.iter().enumerate() {
            if variant.id == 0 {
                errors.push(format!("Variant {}: ID is required", index + 1));
            }
            if variant.price.is_none() {
                errors.push(format!("Variant {}: Price must be a number", index + 1));
            }
        }

        if self.print_areas.is_empty() {
            errors.push("At least one print area is required".to_string());
        }
        for (index, area) in self.print_areas.iter().enumerate() {
            if area.position.trim().is_empty() {
                errors.push(format!("Print area {}: Position is required", index + 1));
            }
            if area.variant_ids.is_empty() {
                errors.push(format!("Print area {}: At least one variant ID is required", index + 1));
            }
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
