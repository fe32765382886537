use actix_web::{post, web, HttpResponse, Result};
use js_deobfuscator::{transform_with_timeout, TransformResult};
use std::time::Instant;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::{DeobfuscateRequest, DeobfuscateResponse, ErrorResponse};
use crate::state::AppState;

/// Deobfuscate a JavaScript snippet
///
/// Renames obfuscated identifiers and numeric literals and lists any inline
/// PowerShell invocations. A transform that times out or fails still answers
/// 200 with `success: false`.
#[utoipa::path(
    post,
    path = "/deobfuscate",
    tag = "deobfuscate",
    request_body = DeobfuscateRequest,
    responses(
        (status = 200, description = "Transform finished or failed", body = DeobfuscateResponse),
        (status = 400, description = "No valid code provided", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse)
    )
)]
#[post("/deobfuscate")]
pub async fn deobfuscate_endpoint(
    req: web::Json<DeobfuscateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request = req.into_inner();
    request.validate().map_err(|_| ApiError::no_valid_code())?;
    let code = request.code.ok_or_else(ApiError::no_valid_code)?;

    let started = Instant::now();
    let result = transform_with_timeout(code, state.config.engine(), state.config.timeout()).await;
    state.metrics.record(&result, started.elapsed());

    Ok(HttpResponse::Ok().json(TransformResult::from(result)))
}
