pub mod classifier;
pub mod config;
pub mod engine;
pub mod errors;
pub mod extractor;
pub mod logger;
pub mod metrics;
pub mod naming;
pub mod powershell;
pub mod transformer;

pub use config::{AppConfig, EngineConfig};
pub use transformer::{
    transform, transform_with_config, transform_with_timeout, validate_source, DeobfuscationError,
    Deobfuscator, TransformOutput, TransformResult,
};
