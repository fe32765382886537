use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::deobfuscate::deobfuscate_endpoint,
        crate::api::monitoring::health
    ),
    components(
        schemas(
            DeobfuscateRequest,
            DeobfuscateResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "deobfuscate", description = "JavaScript deobfuscation"),
        (name = "monitoring", description = "Liveness and metrics")
    ),
    info(
        title = "JavaScript Deobfuscator API",
        version = "0.1.0",
        description = "Renames obfuscated JavaScript identifiers and numbers",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
