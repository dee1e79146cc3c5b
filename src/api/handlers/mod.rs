//! HTTP request handlers
//!
//! One handler per forwarded route. Successful upstream answers are either
//! re-wrapped as `{data: ...}` or passed through byte for byte.

pub mod health;
pub mod shops;
pub mod uploads;
pub mod products;
pub mod catalog;

use actix_web::{http::StatusCode, HttpResponse};

use crate::providers::UpstreamBody;

/// Answer with the upstream status, content type and body unchanged
pub(crate) fn passthrough(body: UpstreamBody) -> HttpResponse {
    let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::OK);
    HttpResponse::build(status)
        .content_type(body.content_type.as_deref().unwrap_or("application/json"))
        .body(body.bytes)
}
