//! Per-invocation context
//!
//! Ties together the system, the transport, the snippet registry and the
//! global command line options. Configuration and credentials are read
//! only when a command asks for them, so `configure` works without a
//! configuration file.

use crate::config::{Credentials, PlatformConfig};
use crate::cubejs::CubeClient;
use crate::graphql::transport::Transport;
use crate::graphql::{GraphQLExecutor, SnippetRegistry};
use crate::output::OutputFormat;
use crate::system::System;
use crate::utils::expand_user_path;
use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct Context<'a> {
    system: &'a dyn System,
    transport: &'a dyn Transport,
    registry: &'a SnippetRegistry,
    config_path: PathBuf,
    output: OutputFormat,
}

impl<'a> Context<'a> {
    /// Create a context, expanding `~` in the configuration path
    ///
    /// # Errors
    ///
    /// Returns an error if the path starts with `~` and no home directory is known
    pub fn new(
        system: &'a dyn System,
        transport: &'a dyn Transport,
        registry: &'a SnippetRegistry,
        config_path: &Path,
        output: OutputFormat,
    ) -> Result<Self> {
        Ok(Self {
            system,
            transport,
            registry,
            config_path: expand_user_path(system, config_path)?,
            output,
        })
    }

    #[must_use]
    pub fn system(&self) -> &'a dyn System {
        self.system
    }

    #[must_use]
    pub fn transport(&self) -> &'a dyn Transport {
        self.transport
    }

    #[must_use]
    pub fn registry(&self) -> &'a SnippetRegistry {
        self.registry
    }

    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    #[must_use]
    pub const fn output(&self) -> OutputFormat {
        self.output
    }

    /// Load the configuration file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing or invalid
    pub fn config(&self) -> Result<PlatformConfig> {
        PlatformConfig::load_from_file(self.system, &self.config_path)
    }

    /// Credential store in the default configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory is known
    pub fn credentials(&self) -> Result<Credentials<'a>> {
        Credentials::from_default_dir(self.system)
    }

    /// GraphQL executor for the configured API
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a missing or invalid configuration
    /// and a missing token error when no token can be found
    pub fn executor(&self) -> Result<GraphQLExecutor<'a>> {
        let config = self.config()?;
        let token = self.credentials()?.api_token();
        Ok(GraphQLExecutor::new(
            config.api,
            token,
            self.transport,
            self.registry,
        )?)
    }

    /// cube.js client for the configured endpoint
    ///
    /// # Errors
    ///
    /// See [`Context::executor`]
    pub fn cube_client(&self) -> Result<CubeClient<'a>> {
        let config = self.config()?;
        let token = self.credentials()?.api_token();
        Ok(CubeClient::new(&config.cubejs, token, self.transport)?)
    }

    /// Render a value in the selected output format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn format(&self, value: &Value) -> Result<String> {
        self.output.format(value)
    }
}
