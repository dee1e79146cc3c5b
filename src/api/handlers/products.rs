//! Product creation and listing

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use utoipa::IntoParams;

use crate::AppState;
use crate::api::error::RelayError;
use super::passthrough;

/// Pagination forwarded to the listing endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductsQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Items per page (the printing API caps this at 50)
    pub limit: Option<u32>,
}

/// POST /api/shops/{shop_id}/products - Create a product
#[utoipa::path(
    post,
    path = "/api/shops/{shop_id}/products",
    tag = "products",
    params(("shop_id" = String, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Created product"),
        (status = 500, description = "Printing API unreachable", body = crate::providers::printify::models::ErrorBody)
    )
)]
pub async fn create_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, RelayError> {
    let shop_id = path.into_inner();
    info!(shop_id = %shop_id, "Creating product");

    let created = state.printify.create_product(&shop_id, &body).await?;

    info!(shop_id = %shop_id, "Product creation successful");
    Ok(passthrough(created))
}

/// GET /api/shops/{shop_id}/products - Paginated product listing
#[utoipa::path(
    get,
    path = "/api/shops/{shop_id}/products",
    tag = "products",
    params(("shop_id" = String, Path, description = "Shop id"), ProductsQuery),
    responses(
        (status = 200, description = "One page of products"),
        (status = 500, description = "Printing API unreachable", body = crate::providers::printify::models::ErrorBody)
    )
)]
pub async fn list_products(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ProductsQuery>,
) -> Result<HttpResponse, RelayError> {
    let shop_id = path.into_inner();
    info!(shop_id = %shop_id, page = ?query.page, limit = ?query.limit, "Fetching products");

    let page = state.printify.products(&shop_id, query.page, query.limit).await?;
    Ok(passthrough(page))
}
