//! Catalog resolver
//!
//! Walks the relay from the canvas blueprint down to priced, sorted size
//! variants. Steps only move forward; any failure parks the resolver in
//! [`ResolverState::Error`].

use std::fmt;

use tracing::{debug, info, warn};

use crate::config::CatalogSettings;
use crate::domain::{DesiredSizeTable, ResolvedCatalog};

use super::client::RelayApi;
use super::error::{WorkflowError, WorkflowResult};

/// Resolver progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Idle,
    BlueprintLookup,
    ProviderLookup,
    VariantLookup,
    VariantFilter,
    Ready,
    Error,
}

impl fmt::Display for ResolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolverState::Idle => "idle",
            ResolverState::BlueprintLookup => "blueprint_lookup",
            ResolverState::ProviderLookup => "provider_lookup",
            ResolverState::VariantLookup => "variant_lookup",
            ResolverState::VariantFilter => "variant_filter",
            ResolverState::Ready => "ready",
            ResolverState::Error => "error",
        };
        f.write_str(name)
    }
}

/// Resolves the canvas blueprint, its provider, variants and shipping
pub struct CatalogResolver {
    blueprint_title: String,
    sizes: DesiredSizeTable,
    state: ResolverState,
    resolved: Option<ResolvedCatalog>,
}

impl CatalogResolver {
    pub fn new(blueprint_title: impl Into<String>, sizes: DesiredSizeTable) -> Self {
        CatalogResolver {
            blueprint_title: blueprint_title.into(),
            sizes,
            state: ResolverState::Idle,
            resolved: None,
        }
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        Self::new(
            settings.blueprint_title.clone(),
            DesiredSizeTable::from_settings(&settings.desired_sizes),
        )
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// Result of a successful run
    pub fn resolved(&self) -> Option<&ResolvedCatalog> {
        self.resolved.as_ref()
    }

    /// Run every lookup step once
    ///
    /// Only an idle resolver can run. On failure the resolver stays in
    /// `Error` and the error is returned.
    pub async fn resolve<A>(&mut self, api: &A) -> WorkflowResult<&ResolvedCatalog>
    where
        A: RelayApi + ?Sized,
    {
        if self.state != ResolverState::Idle {
            return Err(WorkflowError::ResolverNotIdle(self.state.to_string()));
        }

        match self.run(api).await {
            Ok(catalog) => {
                self.state = ResolverState::Ready;
                Ok(self.resolved.insert(catalog))
            }
            Err(e) => {
                warn!(state = %self.state, error = %e, "Catalog resolution failed");
                self.state = ResolverState::Error;
                Err(e)
            }
        }
    }

    async fn run<A>(&mut self, api: &A) -> WorkflowResult<ResolvedCatalog>
    where
        A: RelayApi + ?Sized,
    {
        self.state = ResolverState::BlueprintLookup;
        let blueprint = api
            .blueprints()
            .await?
            .into_iter()
            .find(|b| b.title == self.blueprint_title)
            .ok_or_else(|| WorkflowError::BlueprintNotFound(self.blueprint_title.clone()))?;
        info!(blueprint_id = blueprint.id, title = %blueprint.title, "Found blueprint");

        self.state = ResolverState::ProviderLookup;
        let provider = api
            .print_providers(blueprint.id)
            .await?
            .into_iter()
            .next()
            .ok_or(WorkflowError::ProviderNotFound { available: Vec::new() })?;
        info!(provider_id = provider.id, title = %provider.title, "Found print provider");

        self.state = ResolverState::VariantLookup;
        let (variants, shipping) = futures::try_join!(
            api.variants(blueprint.id, provider.id),
            api.shipping(blueprint.id, provider.id),
        )?;
        debug!(count = variants.len(), "Fetched variants and shipping");

        self.state = ResolverState::VariantFilter;
        let variants = self.sizes.select(variants.into_values());
        if variants.is_empty() {
            return Err(WorkflowError::NoMatchingVariants);
        }
        info!(
            count = variants.len(),
            sizes = ?variants.iter().filter_map(|v| v.options.size.as_deref()).collect::<Vec<_>>(),
            "Selected variants"
        );

        Ok(ResolvedCatalog {
            blueprint,
            provider,
            variants,
            shipping,
        })
    }
}
