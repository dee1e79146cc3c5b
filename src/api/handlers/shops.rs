//! Shop listing

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::info;

use crate::AppState;
use crate::api::error::RelayError;
use crate::providers::printify::models::DataEnvelope;

/// GET /api/shops - List the merchant's shops
#[utoipa::path(
    get,
    path = "/api/shops",
    tag = "shops",
    responses(
        (status = 200, description = "Shops wrapped as {data: [...]}"),
        (status = 500, description = "Printing API unreachable", body = crate::providers::printify::models::ErrorBody)
    )
)]
pub async fn list_shops(state: web::Data<AppState>) -> Result<HttpResponse, RelayError> {
    info!("Fetching shops");

    let shops = match state.printify.shops().await?.json()? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };

    info!(count = shops.len(), "Fetched shops");
    Ok(HttpResponse::Ok().json(DataEnvelope { data: shops }))
}
