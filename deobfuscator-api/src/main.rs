use actix_web::web;
use deobfuscator_api::api::start_server;
use deobfuscator_api::state::AppState;
use js_deobfuscator::config::{load_config, Overrides};
use js_deobfuscator::logger;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logging();

    let config = load_config(None, &Overrides::default())?;
    info!(bind = %config.bind, timeout_secs = config.timeout_secs, "starting deobfuscator api");

    let state = web::Data::new(AppState::new(config)?);
    start_server(state).await?;
    Ok(())
}
