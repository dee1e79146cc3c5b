//! OpenAPI 3.0 specification definition

use utoipa::OpenApi;

use crate::api::handlers::health::HealthResponse;
use crate::providers::printify::models::{
    ErrorBody, ImageUploadRequest, NoVariantsBody, ProviderNotFoundBody,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Canvas Relay API",
        version = "1.0.0",
        description = "Credential-holding relay in front of the Printify REST API for canvas print products"
    ),
    servers(
        (url = "/", description = "Current server")
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "shops", description = "Merchant shops"),
        (name = "uploads", description = "Image uploads"),
        (name = "products", description = "Product creation and listing"),
        (name = "catalog", description = "Blueprints, print providers, variants and shipping")
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::shops::list_shops,
        crate::api::handlers::uploads::upload_image,
        crate::api::handlers::products::create_product,
        crate::api::handlers::products::list_products,
        crate::api::handlers::catalog::list_blueprints,
        crate::api::handlers::catalog::get_blueprint,
        crate::api::handlers::catalog::list_blueprint_providers,
        crate::api::handlers::catalog::list_variants,
        crate::api::handlers::catalog::get_shipping,
        crate::api::handlers::catalog::list_print_providers,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            ProviderNotFoundBody,
            NoVariantsBody,
            ImageUploadRequest,
        )
    )
)]
pub struct ApiDoc;
