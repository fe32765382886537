use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::error::JsonPayloadError;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::errors::ApiError;
use crate::state::AppState;

pub mod deobfuscate;
pub mod monitoring;
pub mod openapi;

fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let api_error = match err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    ApiError::PayloadTooLarge
                }
                _ => ApiError::no_valid_code(),
            };
            api_error.into()
        })
}

pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let body_limit = state.config.body_limit;

    App::new()
        .wrap(TracingLogger::default())
        .wrap(Cors::permissive())
        .app_data(state)
        .app_data(json_config(body_limit))
        .service(deobfuscate::deobfuscate_endpoint)
        .route("/", web::get().to(monitoring::banner))
        .route("/health", web::get().to(monitoring::health))
        .route("/metrics", web::get().to(monitoring::metrics))
        .route("/api-docs/openapi.json", web::get().to(openapi::openapi_json))
}

pub async fn start_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let bind_address = state.config.bind.clone();
    tracing::info!(%bind_address, "listening");

    HttpServer::new(move || create_app(state.clone()))
        .bind(bind_address)?
        .run()
        .await
}
