//! Shop product listing
//!
//! Fetches every page of a shop's products, keeps the ones made by the
//! listed providers and filters them locally.

use clap::ValueEnum;
use tracing::{debug, info};

use crate::providers::printify::models::ProductSummary;

use super::client::RelayApi;
use super::error::WorkflowResult;

/// Largest page size the printing API accepts
pub const MAX_PAGE_SIZE: u32 = 50;

/// Publish status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PublishStatus {
    #[default]
    All,
    Published,
    Unpublished,
}

/// Local product filter
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive title substring
    pub search: Option<String>,
    pub provider_id: Option<u64>,
    pub status: PublishStatus,
}

impl ProductFilter {
    pub fn matches(&self, product: &ProductSummary) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => product.title.to_lowercase().contains(&term.to_lowercase()),
            _ => true,
        };

        let provider_ok = self
            .provider_id
            .map_or(true, |id| product.print_provider_id == Some(id));

        let status_ok = match self.status {
            PublishStatus::All => true,
            PublishStatus::Published => product.visible,
            PublishStatus::Unpublished => !product.visible,
        };

        search_ok && provider_ok && status_ok
    }

    pub fn apply<'p>(&self, products: &'p [ProductSummary]) -> Vec<&'p ProductSummary> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// All of a shop's products from the listed providers
pub struct ProductListing {
    provider_ids: Vec<u64>,
    page_size: u32,
}

impl ProductListing {
    pub fn new(provider_ids: Vec<u64>, page_size: u32) -> Self {
        ProductListing {
            provider_ids,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Fetch page 1, then the remaining pages one after another
    pub async fn fetch_all<A>(&self, api: &A, shop_id: &str) -> WorkflowResult<Vec<ProductSummary>>
    where
        A: RelayApi + ?Sized,
    {
        let first = api.products(shop_id, 1, self.page_size).await?;
        let pages = first.total.div_ceil(u64::from(self.page_size)).max(1) as u32;
        debug!(shop_id = %shop_id, total = first.total, pages, "Fetched first product page");

        let mut products = first.data;
        for page in 2..=pages {
            let next = api.products(shop_id, page, self.page_size).await?;
            products.extend(next.data);
        }

        let fetched = products.len();
        products.retain(|p| p.print_provider_id.is_some_and(|id| self.provider_ids.contains(&id)));
        info!(shop_id = %shop_id, fetched, kept = products.len(), "Fetched products");

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::testing::{product, FakeRelay};

    #[tokio::test]
    async fn test_fetches_every_page_and_keeps_listed_providers() {
        let mut relay = FakeRelay::canvas();
        relay.products = (0..120)
            .map(|i| product(&i.to_string(), &format!("Canvas {}", i), if i % 3 == 0 { 99 } else { 105 }, true))
            .collect();

        let listing = ProductListing::new(vec![105, 2], 50);
        let products = listing.fetch_all(&relay, "9001").await.unwrap();

        assert_eq!(*relay.page_requests.lock().unwrap(), vec![(1, 50), (2, 50), (3, 50)]);
        assert_eq!(products.len(), 80);
        assert!(products.iter().all(|p| p.print_provider_id == Some(105)));
    }

    #[tokio::test]
    async fn test_empty_shop_fetches_one_page() {
        let relay = FakeRelay::canvas();
        let listing = ProductListing::new(vec![105], 50);

        assert!(listing.fetch_all(&relay, "9001").await.unwrap().is_empty());
        assert_eq!(relay.page_requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let products = vec![
            product("1", "Harbor at Dusk", 105, true),
            product("2", "harbor sketch", 2, false),
            product("3", "Mountains", 105, false),
        ];

        let search = ProductFilter { search: Some("HARBOR".into()), ..Default::default() };
        assert_eq!(search.apply(&products).len(), 2);

        let unpublished = ProductFilter { status: PublishStatus::Unpublished, provider_id: Some(105), ..Default::default() };
        let ids: Vec<_> = unpublished.apply(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }
}
