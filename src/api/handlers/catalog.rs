//! Catalog API handlers
//!
//! Blueprints, their print providers, and provider variants and shipping.

use actix_web::{web, HttpResponse};
use tracing::{info, warn};

use crate::AppState;
use crate::api::error::RelayError;
use crate::providers::PrintifyMapper;
use crate::providers::printify::models::DataEnvelope;
use super::passthrough;

/// GET /api/catalog - List blueprints
#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Blueprints wrapped as {data: [...]}"),
        (status = 500, description = "Printing API unreachable", body = crate::providers::printify::models::ErrorBody)
    )
)]
pub async fn list_blueprints(state: web::Data<AppState>) -> Result<HttpResponse, RelayError> {
    info!("Fetching catalog");

    let blueprints = PrintifyMapper::unwrap_list(state.printify.blueprints().await?.json()?);

    info!(count = blueprints.len(), "Fetched blueprints");
    Ok(HttpResponse::Ok().json(DataEnvelope { data: blueprints }))
}

/// GET /api/catalog/{blueprint_id} - Blueprint detail
#[utoipa::path(
    get,
    path = "/api/catalog/{blueprint_id}",
    tag = "catalog",
    params(("blueprint_id" = String, Path, description = "Blueprint id")),
    responses(
        (status = 200, description = "Blueprint detail as returned by the printing API")
    )
)]
pub async fn get_blueprint(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, RelayError> {
    let blueprint_id = path.into_inner();
    info!(blueprint_id = %blueprint_id, "Fetching blueprint");

    Ok(passthrough(state.printify.blueprint(&blueprint_id).await?))
}

/// GET /api/catalog/{blueprint_id}/print_providers - The accepted provider for a blueprint
#[utoipa::path(
    get,
    path = "/api/catalog/{blueprint_id}/print_providers",
    tag = "catalog",
    params(("blueprint_id" = String, Path, description = "Blueprint id")),
    responses(
        (status = 200, description = "The accepted provider wrapped as {data: [provider]}"),
        (status = 404, description = "Accepted provider not offered", body = crate::providers::printify::models::ProviderNotFoundBody)
    )
)]
pub async fn list_blueprint_providers(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, RelayError> {
    let blueprint_id = path.into_inner();
    let accepted = &state.settings.catalog.primary_provider;
    info!(blueprint_id = %blueprint_id, "Fetching print providers");

    let providers = PrintifyMapper::unwrap_list(state.printify.blueprint_providers(&blueprint_id).await?.json()?);

    let Some(provider) = PrintifyMapper::select_provider(&providers, accepted) else {
        let available = PrintifyMapper::provider_titles(&providers);
        warn!(blueprint_id = %blueprint_id, provider = %accepted, available = ?available, "Accepted provider not offered");
        return Err(RelayError::ProviderNotFound {
            provider: accepted.clone(),
            available,
        });
    };

    let provider_id = provider.get("id").cloned().unwrap_or_default();
    info!(blueprint_id = %blueprint_id, provider_id = %provider_id, "Found print provider");
    Ok(HttpResponse::Ok().json(DataEnvelope { data: vec![provider] }))
}

/// GET /api/catalog/{blueprint_id}/print_providers/{provider_id}/variants - Usable variants
#[utoipa::path(
    get,
    path = "/api/catalog/{blueprint_id}/print_providers/{provider_id}/variants",
    tag = "catalog",
    params(
        ("blueprint_id" = String, Path, description = "Blueprint id"),
        ("provider_id" = String, Path, description = "Print provider id")
    ),
    responses(
        (status = 200, description = "Variants keyed by opaque id, wrapped as {data: {...}}"),
        (status = 404, description = "No usable variants", body = crate::providers::printify::models::NoVariantsBody)
    )
)]
pub async fn list_variants(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, RelayError> {
    let (blueprint_id, provider_id) = path.into_inner();
    info!(blueprint_id = %blueprint_id, provider_id = %provider_id, "Fetching variants");

    let raw = state.printify.variants(&blueprint_id, &provider_id).await?.json()?;
    let variants = PrintifyMapper::extract_variants(raw);
    let original_count = variants.len();
    let valid = PrintifyMapper::valid_variants(variants);

    info!(original_count, valid_count = valid.len(), "Validated variants");

    if valid.is_empty() {
        return Err(RelayError::NoValidVariants);
    }

    Ok(HttpResponse::Ok().json(DataEnvelope { data: valid }))
}

/// GET /api/catalog/{blueprint_id}/print_providers/{provider_id}/shipping - Shipping table
#[utoipa::path(
    get,
    path = "/api/catalog/{blueprint_id}/print_providers/{provider_id}/shipping",
    tag = "catalog",
    params(
        ("blueprint_id" = String, Path, description = "Blueprint id"),
        ("provider_id" = String, Path, description = "Print provider id")
    ),
    responses(
        (status = 200, description = "Shipping table as returned by the printing API")
    )
)]
pub async fn get_shipping(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, RelayError> {
    let (blueprint_id, provider_id) = path.into_inner();
    info!(blueprint_id = %blueprint_id, provider_id = %provider_id, "Fetching shipping info");

    Ok(passthrough(state.printify.shipping(&blueprint_id, &provider_id).await?))
}

/// GET /api/print-providers - Providers the listing flow works with
#[utoipa::path(
    get,
    path = "/api/print-providers",
    tag = "catalog",
    responses(
        (status = 200, description = "Accepted providers wrapped as {data: [...]}")
    )
)]
pub async fn list_print_providers(state: web::Data<AppState>) -> Result<HttpResponse, RelayError> {
    info!("Fetching global print providers");

    let providers = PrintifyMapper::unwrap_list(state.printify.print_providers().await?.json()?);
    let accepted = PrintifyMapper::filter_providers(providers, &state.settings.catalog.listed_providers);

    info!(count = accepted.len(), "Filtered print providers");
    Ok(HttpResponse::Ok().json(DataEnvelope { data: accepted }))
}
