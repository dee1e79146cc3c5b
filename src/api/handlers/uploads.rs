//! Image upload forwarding

use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::info;

use crate::AppState;
use crate::api::error::RelayError;
use super::passthrough;

/// POST /api/uploads/images - Upload a base64-encoded image
#[utoipa::path(
    post,
    path = "/api/uploads/images",
    tag = "uploads",
    request_body = crate::providers::printify::models::ImageUploadRequest,
    responses(
        (status = 200, description = "Uploaded image, including its id"),
        (status = 500, description = "Printing API unreachable", body = crate::providers::printify::models::ErrorBody)
    )
)]
pub async fn upload_image(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, RelayError> {
    let file_name = body.get("file_name").and_then(Value::as_str).unwrap_or("<unnamed>").to_string();
    info!(file_name = %file_name, "Uploading image");

    let uploaded = state.printify.upload_image(&body).await?;

    info!(file_name = %file_name, "Image upload successful");
    Ok(passthrough(uploaded))
}
