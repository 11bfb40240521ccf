//! Configuration management module
//!
//! Handles the JSON configuration file, its JSON schema validation, stored
//! credentials and the derivation of a configuration from a live console.

pub mod autoconfig;
pub mod credentials;
pub mod schema;

pub use credentials::Credentials;

use crate::error::PlatformError;
use crate::system::System;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Contents of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// GraphQL API endpoint
    pub api: String,

    /// Cognito user pool id
    pub cognito_user_pool_id: String,

    /// Cognito user pool client id
    pub cognito_client_id: String,

    /// Cognito region
    pub region: String,

    /// cube.js analytics endpoint
    pub cubejs: String,

    /// SSO identity provider id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idp_id: Option<String>,

    /// SSO authorization URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
}

impl PlatformConfig {
    /// Build a configuration from a JSON value, validating it against the schema
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the value does not match the schema
    pub fn from_value(value: &Value) -> Result<Self> {
        schema::validate_against_schema(value)?;
        serde_json::from_value(value.clone()).map_err(|e| {
            PlatformError::configuration(format!("Invalid configuration: {e}")).into()
        })
    }

    /// Load and validate the configuration file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing, is not JSON, or
    /// does not match the schema
    pub fn load_from_file(system: &dyn System, path: &Path) -> Result<Self> {
        if !system.is_file(path) {
            return Err(PlatformError::configuration(format!(
                "Configuration file not found: {}\n\
                Run 'stacklet-admin configure' or 'stacklet-admin auto-configure' first, \
                or specify a different path with --config",
                path.display()
            ))
            .into());
        }

        let content = system
            .read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            PlatformError::configuration(format!(
                "Failed to parse JSON configuration in file {}: {e}",
                path.display()
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Self::from_value(&value)
    }

    /// Convert to a JSON value, leaving out unset optional keys
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Write the configuration file, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn save_to_file(&self, system: &dyn System, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && parent != Path::new("")
        {
            system
                .create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        system
            .write(path, content.as_bytes())
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))
    }
}
