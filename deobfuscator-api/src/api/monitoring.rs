use actix_web::{web, HttpResponse, Result as ActixResult};
use prometheus::{Encoder, TextEncoder};

use crate::errors::ApiError;
use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn banner() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("🛡️ JavaScript Deobfuscator API is running")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "monitoring",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Enhanced JavaScript Deobfuscator is running".to_string(),
    })
}

// Prometheus metrics endpoint
pub async fn metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse, ApiError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&state.registry.gather(), &mut buffer)?;
    let body = String::from_utf8(buffer).map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(body))
}
