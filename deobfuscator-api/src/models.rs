use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeobfuscateRequest {
    /// JavaScript source to transform
    #[validate(required, custom = "not_blank")]
    pub code: Option<String>,
}

fn not_blank(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Body of a finished transform. Timeouts and engine failures use
/// [`ErrorResponse`] with status 200.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeobfuscateResponse {
    pub success: bool,
    pub deobfuscated: String,
    pub mappings: BTreeMap<String, String>,
    pub numeric_mappings: BTreeMap<String, String>,
    pub powershell_commands: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
