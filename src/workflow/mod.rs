//! Client-side upload workflow
//!
//! Drives the relay the way the merchant tool does: resolve the canvas
//! catalog, prepare an image, assemble and submit a product, list products.

mod client;
mod error;
mod listing;
mod resolver;
mod session;

#[cfg(test)]
mod testing;

pub use client::{RelayApi, RelayClient};
pub use error::{WorkflowError, WorkflowResult};
pub use listing::{ProductFilter, ProductListing, PublishStatus, MAX_PAGE_SIZE};
pub use resolver::{CatalogResolver, ResolverState};
pub use session::{DryRun, UploadForm, UploadSession};
