//! One-call entry points: validation, a fresh session per call, result
//! shaping and the timeout race.

use crate::classifier::Classifier;
use crate::config::EngineConfig;
use crate::engine::{substitute, Session};
use crate::extractor::{self, TokenKind};
use crate::powershell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum DeobfuscationError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("processing error: {0}")]
    Processing(String),
    #[error("Script execution timed out")]
    Timeout,
}

impl From<tokio::time::error::Elapsed> for DeobfuscationError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        DeobfuscationError::Timeout
    }
}

impl From<tokio::task::JoinError> for DeobfuscationError {
    fn from(err: tokio::task::JoinError) -> Self {
        DeobfuscationError::Processing(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub deobfuscated: String,
    pub mappings: BTreeMap<String, String>,
    pub numeric_mappings: BTreeMap<String, String>,
    pub powershell_commands: Vec<String>,
}

/// Wire shape: `{"success": true, …output}` or `{"success": false, "error"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TransformResult {
    Success {
        success: bool,
        #[serde(flatten)]
        output: TransformOutput,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl TransformResult {
    pub fn success(output: TransformOutput) -> Self {
        TransformResult::Success { success: true, output }
    }

    pub fn failure(error: impl ToString) -> Self {
        TransformResult::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransformResult::Success { .. })
    }
}

impl From<Result<TransformOutput, DeobfuscationError>> for TransformResult {
    fn from(result: Result<TransformOutput, DeobfuscationError>) -> Self {
        match result {
            Ok(output) => TransformResult::success(output),
            Err(err) => TransformResult::failure(err),
        }
    }
}

/// Rejects input that is empty once trimmed.
pub fn validate_source(source: &str) -> Result<(), DeobfuscationError> {
    if source.trim().is_empty() {
        return Err(DeobfuscationError::InvalidInput("No valid code provided".to_string()));
    }
    Ok(())
}

pub struct Deobfuscator {
    classifier: Classifier,
    config: EngineConfig,
}

impl Deobfuscator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            classifier: Classifier::new(&config.extra_protected),
            config: config.clone(),
        }
    }

    pub fn transform(&self, source: &str) -> Result<TransformOutput, DeobfuscationError> {
        validate_source(source)?;

        let mut session = Session::new();
        if self.config.seed_source_identifiers {
            session.seed_from_source(source);
        }

        let candidates = extractor::extract(source, &self.classifier);
        debug!(
            identifiers = candidates.identifiers.len(),
            numbers = candidates.numbers.len(),
            "candidates extracted"
        );
        session.build_identifier_mappings(source, &candidates, &self.classifier);
        session.build_numeric_mappings(&candidates, self.config.number_mode());

        let renamed = substitute(source, TokenKind::Identifier, &session.mappings);
        let deobfuscated = substitute(&renamed, TokenKind::Number, &session.numeric_mappings);
        let powershell_commands = powershell::scrape(&deobfuscated);

        Ok(TransformOutput {
            deobfuscated,
            mappings: session.mappings,
            numeric_mappings: session.numeric_mappings,
            powershell_commands,
        })
    }
}

/// Boundary form: validation failures and panics become a failure result
/// instead of propagating.
pub fn transform(source: &str) -> TransformResult {
    transform_with_config(source, &EngineConfig::default())
}

pub fn transform_with_config(source: &str, config: &EngineConfig) -> TransformResult {
    if let Err(err) = validate_source(source) {
        return TransformResult::failure(err);
    }
    match panic::catch_unwind(AssertUnwindSafe(|| Deobfuscator::new(config).transform(source))) {
        Ok(result) => result.into(),
        Err(_) => TransformResult::failure(DeobfuscationError::Processing(
            "internal error while transforming".to_string(),
        )),
    }
}

/// Runs `job` on the blocking pool and races it against `limit`. On
/// timeout the job keeps running to completion, its result is dropped.
pub async fn run_with_timeout<T, F>(limit: Duration, job: F) -> Result<T, DeobfuscationError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(job);
    Ok(tokio::time::timeout(limit, handle).await??)
}

pub async fn transform_with_timeout(
    source: String,
    config: EngineConfig,
    limit: Duration,
) -> Result<TransformOutput, DeobfuscationError> {
    validate_source(&source)?;
    let length = source.len();
    let result = run_with_timeout(limit, move || Deobfuscator::new(&config).transform(&source))
        .await
        .and_then(|inner| inner);
    match &result {
        Ok(output) => info!(
            length,
            identifiers = output.mappings.len(),
            numbers = output.numeric_mappings.len(),
            powershell = output.powershell_commands.len(),
            "transform finished"
        ),
        Err(err) => warn!(length, error = %err, "transform failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(
            Deobfuscator::new(&EngineConfig::default()).transform("   \n\t"),
            Err(DeobfuscationError::InvalidInput(_))
        ));
        assert!(!transform("").is_success());
    }

    #[test]
    fn wire_shape() {
        let ok = serde_json::to_value(transform("var n = 12345;")).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["deobfuscated"], "var element = a;");
        assert_eq!(ok["mappings"]["n"], "element");
        assert_eq!(ok["numericMappings"]["12345"], "a");
        assert!(ok["powershellCommands"].as_array().unwrap().is_empty());

        let err = serde_json::to_value(transform(" ")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "No valid code provided");
    }

    #[tokio::test]
    async fn slow_jobs_time_out() {
        let result = run_with_timeout(Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(300));
        })
        .await;
        assert!(matches!(result, Err(DeobfuscationError::Timeout)));
        assert_eq!(DeobfuscationError::Timeout.to_string(), "Script execution timed out");
    }

    #[tokio::test]
    async fn panicking_jobs_become_processing_errors() {
        let result: Result<(), _> = run_with_timeout(Duration::from_secs(5), || panic!("boom")).await;
        assert!(matches!(result, Err(DeobfuscationError::Processing(_))));
    }

    #[tokio::test]
    async fn timeout_wrapper_returns_output() {
        let output = transform_with_timeout(
            "var _0x1a2b = 5;".to_string(),
            EngineConfig::default(),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(output.deobfuscated, "var element = 5;");
    }
}
