//! JSON Schema validation for the configuration file

use crate::error::PlatformError;
use anyhow::{Result, anyhow};
use jsonschema::Validator;
use serde_json::Value;

/// Get the embedded JSON schema for the configuration file
///
/// # Errors
///
/// Returns an error if the embedded schema is not valid JSON or not a valid Draft 7 schema
pub fn get_schema() -> Result<Validator> {
    let schema_str = include_str!("../../docs/config.schema.json");
    let schema: Value = serde_json::from_str(schema_str)
        .map_err(|e| anyhow!("Failed to parse embedded JSON schema: {e}"))?;

    jsonschema::draft7::new(&schema).map_err(|e| anyhow!("Failed to compile JSON schema: {e}"))
}

/// Validate a configuration value against the schema
///
/// Every violation is reported, one per line.
///
/// # Errors
///
/// Returns a configuration error listing all schema violations
pub fn validate_against_schema(config: &Value) -> Result<()> {
    let schema = get_schema()?;

    let error_messages: Vec<String> = schema
        .iter_errors(config)
        .map(|e| format!("  - {e}"))
        .collect();

    if !error_messages.is_empty() {
        return Err(PlatformError::configuration(format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_schema_compiles() {
        get_schema().unwrap();
    }

    #[test]
    fn reports_every_missing_key() {
        let err = validate_against_schema(&json!({"api": "https://api"})).unwrap_err();
        let message = err.to_string();
        for key in ["cognito_user_pool_id", "cognito_client_id", "region", "cubejs"] {
            assert!(message.contains(key), "{key} missing from: {message}");
        }
        assert!(!message.contains("\"api\""));
    }

    #[test]
    fn rejects_wrong_types() {
        let config = json!({
            "api": 1,
            "cognito_user_pool_id": "p",
            "cognito_client_id": "c",
            "region": "r",
            "cubejs": "q",
        });
        assert!(validate_against_schema(&config).is_err());
    }
}
