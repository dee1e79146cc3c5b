//! API module - HTTP routes and handlers

pub mod error;
pub mod handlers;
pub mod openapi;

use actix_web::{error::InternalError, web, HttpResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;
use crate::providers::printify::models::ErrorBody;

/// Configure all API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/shops", web::get().to(handlers::shops::list_shops))
            .route("/uploads/images", web::post().to(handlers::uploads::upload_image))
            .service(
                web::scope("/shops/{shop_id}")
                    .route("/products", web::post().to(handlers::products::create_product))
                    .route("/products", web::get().to(handlers::products::list_products))
            )
            .service(
                web::scope("/catalog")
                    // More specific routes first
                    .route(
                        "/{blueprint_id}/print_providers/{provider_id}/variants",
                        web::get().to(handlers::catalog::list_variants),
                    )
                    .route(
                        "/{blueprint_id}/print_providers/{provider_id}/shipping",
                        web::get().to(handlers::catalog::get_shipping),
                    )
                    .route("/{blueprint_id}/print_providers", web::get().to(handlers::catalog::list_blueprint_providers))
                    // General routes
                    .route("", web::get().to(handlers::catalog::list_blueprints))
                    .route("/{blueprint_id}", web::get().to(handlers::catalog::get_blueprint))
            )
            .route("/print-providers", web::get().to(handlers::catalog::list_print_providers))
    )
    .route("/health", web::get().to(handlers::health::health_check))
    // Swagger UI and OpenAPI spec
    .service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", ApiDoc::openapi())
    );
}

/// JSON extractor config with the request body limit in megabytes
pub fn json_config(limit_mb: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit_mb.max(1) * 1024 * 1024)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorBody {
                message: err.to_string(),
            });
            InternalError::from_response(err, response).into()
        })
}
