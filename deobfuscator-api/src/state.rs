use js_deobfuscator::config::AppConfig;
use js_deobfuscator::metrics::Metrics;
use prometheus::Registry;

/// Shared by every worker. Each request still builds its own engine session.
pub struct AppState {
    pub config: AppConfig,
    pub registry: Registry,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let metrics = Metrics::new(&registry)?;
        Ok(Self {
            config,
            registry,
            metrics,
        })
    }
}
