use config as config_rs;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::engine::NumberMode;

pub const ENV_PREFIX: &str = "JSDEOB";

/// Knobs of the transformation engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub decode_numbers_as_chars: bool,
    #[serde(default)]
    pub extra_protected: Vec<String>,
    #[serde(default = "default_true")]
    pub seed_source_identifiers: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decode_numbers_as_chars: false,
            extra_protected: Vec::new(),
            seed_source_identifiers: true,
        }
    }
}

impl EngineConfig {
    pub fn number_mode(&self) -> NumberMode {
        if self.decode_numbers_as_chars {
            NumberMode::DecodeChars
        } else {
            NumberMode::Alphabetic
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub decode_numbers_as_chars: bool,
    pub extra_protected: Vec<String>,
    pub seed_source_identifiers: bool,
    pub timeout_secs: u64,
    pub bind: String,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            decode_numbers_as_chars: self.decode_numbers_as_chars,
            extra_protected: self.extra_protected.clone(),
            seed_source_identifiers: self.seed_source_identifiers,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Values supplied on the command line. They beat file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub decode_numbers_as_chars: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub bind: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
}

pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    load_config_with_prefix(path, overrides, ENV_PREFIX)
}

pub(crate) fn load_config_with_prefix(
    path: Option<&Path>,
    overrides: &Overrides,
    env_prefix: &str,
) -> Result<AppConfig, ConfigError> {
    let mut builder = config_rs::Config::builder()
        .set_default("decode_numbers_as_chars", false)?
        .set_default("extra_protected", Vec::<String>::new())?
        .set_default("seed_source_identifiers", true)?
        .set_default("timeout_secs", 30)?
        .set_default("bind", "0.0.0.0:3000")?
        .set_default("body_limit", 2 * 1024 * 1024)?;

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", path.display()),
            )));
        }
        builder = builder.add_source(config_rs::File::from(path));
    }

    builder = builder.add_source(config_rs::Environment::with_prefix(env_prefix));

    // CLI flags take precedence
    if let Some(decode) = overrides.decode_numbers_as_chars {
        builder = builder.set_override("decode_numbers_as_chars", decode)?;
    }
    if let Some(secs) = overrides.timeout_secs {
        builder = builder.set_override("timeout_secs", secs as i64)?;
    }
    if let Some(bind) = &overrides.bind {
        builder = builder.set_override("bind", bind.clone())?;
    }

    Ok(builder.build()?.try_deserialize()?)
}
