//! Domain types and models

pub mod catalog;
pub mod product;
mod description;

pub use catalog::{
    Blueprint, PrintProvider, Variant, VariantOptions, ShippingInfo, ShippingProfile, ShippingMethod,
    DesiredSizeTable, ResolvedCatalog, CANVAS_BLUEPRINT_TITLE,
    normalize_size_label, size_prefix, sort_by_size,
};
pub use product::{
    ProductDraft, AssemblyInput, DraftVariant, PrintArea, Placeholder, ImagePlacement,
    PlacementOverride, PrintDetails,
};
pub use description::DEFAULT_CANVAS_DESCRIPTION;
