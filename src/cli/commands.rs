//! Commands that do not map onto a single snippet

use super::args::DEFAULT_CONFIG;
use crate::config::PlatformConfig;
use crate::config::autoconfig::{self, ConsoleHost};
use crate::context::Context;
use crate::cubejs;
use crate::error::PlatformError;
use crate::output::repr;
use crate::utils::expand_user_path;
use anyhow::{Context as _, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use clap::{Args, Subcommand};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum StaticCommand {
    /// Save a configuration file from explicit values
    Configure(ConfigureArgs),

    /// Fetch the configuration of a deployment from its console and save it
    AutoConfigure(AutoConfigureArgs),

    /// Show your config
    Show,

    /// Run arbitrary graphql snippets
    Graphql {
        #[command(subcommand)]
        command: GraphqlCommand,
    },

    /// Run arbitrary cubejs queries
    Cubejs {
        #[command(subcommand)]
        command: CubejsCommand,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConfigureArgs {
    /// Stacklet GraphQL API endpoint
    #[arg(long)]
    pub api: String,

    /// Cognito region
    #[arg(long)]
    pub region: String,

    /// Cognito user pool client id
    #[arg(long)]
    pub cognito_client_id: String,

    /// Cognito user pool id
    #[arg(long)]
    pub cognito_user_pool_id: String,

    /// Stacklet cube.js endpoint
    #[arg(long)]
    pub cubejs: String,

    /// SAML identity provider id
    #[arg(long, default_value = "")]
    pub idp_id: String,

    /// Cognito authorization URL
    #[arg(long, default_value = "")]
    pub auth_url: String,

    /// Where to save the configuration
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG)]
    pub location: PathBuf,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AutoConfigureArgs {
    /// Console URL of the deployment
    #[arg(long, required_unless_present = "prefix")]
    pub url: Option<String>,

    /// Deployment prefix, for deployments under stacklet.io
    #[arg(long, conflicts_with = "url")]
    pub prefix: Option<String>,

    /// Name of the SAML identity provider, when several are set up
    #[arg(long)]
    pub idp: Option<String>,

    /// Where to save the configuration
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG)]
    pub location: PathBuf,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GraphqlCommand {
    /// Run a query or mutation as is
    Run {
        /// GraphQL query or mutation, read from stdin when omitted
        #[arg(long)]
        snippet: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CubejsCommand {
    /// Run a cube.js query
    Run {
        /// JSON encoded query, read from stdin when omitted
        #[arg(long)]
        query: Option<String>,
    },

    /// Show the available cubes
    Meta,

    /// Daily resource counts over the last 30 days
    ResourceCounts,
}

impl StaticCommand {
    /// Run the command, writing its output to `out`
    ///
    /// # Errors
    ///
    /// Returns the first failure of the command
    pub fn execute(&self, context: &Context<'_>, out: &mut dyn Write) -> Result<()> {
        match self {
            Self::Configure(args) => configure(args, context, out),
            Self::AutoConfigure(args) => auto_configure(args, context, out),
            Self::Show => show(context, out),
            Self::Graphql {
                command: GraphqlCommand::Run { snippet },
            } => {
                let query = text_or_stdin(context, snippet.as_deref())?;
                let result = context.executor()?.run_query(&query)?;
                writeln!(out, "{}", context.format(&result)?)?;
                Ok(())
            }
            Self::Cubejs { command } => run_cubejs(command, context, out),
        }
    }
}

fn configure(args: &ConfigureArgs, context: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let config = PlatformConfig {
        api: args.api.clone(),
        region: args.region.clone(),
        cognito_client_id: args.cognito_client_id.clone(),
        cognito_user_pool_id: args.cognito_user_pool_id.clone(),
        cubejs: args.cubejs.clone(),
        idp_id: non_empty(&args.idp_id),
        auth_url: non_empty(&args.auth_url),
    };
    save(&config, &args.location, context, out)
}

fn auto_configure(
    args: &AutoConfigureArgs,
    context: &Context<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let console = ConsoleHost::resolve(args.url.as_deref(), args.prefix.as_deref())?;
    let details = autoconfig::fetch_details(context.transport(), &console)?;
    let config = autoconfig::derive_config(&details, args.idp.as_deref())?;
    save(&config, &args.location, context, out)
}

fn save(
    config: &PlatformConfig,
    location: &Path,
    context: &Context<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    PlatformConfig::from_value(&config.to_value())?;

    let path = expand_user_path(context.system(), location)?;
    config.save_to_file(context.system(), &path)?;
    info!("Wrote {}", path.display());
    writeln!(out, "Saved config to {}", location.display())?;
    Ok(())
}

fn show(context: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let config = context.config()?;
    if let Some(id_token) = context.credentials()?.id_token() {
        let claims = decode_claims(&id_token)?;
        writeln!(out, "{}", context.format(&claims)?)?;
        writeln!(out)?;
    }
    writeln!(out, "{}", context.format(&config.to_value())?)?;
    Ok(())
}

/// Payload of a JWT, without verifying its signature
///
/// # Errors
///
/// Returns an invalid input error if the token is not a JWT
pub fn decode_claims(token: &str) -> Result<Value, PlatformError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| PlatformError::invalid_input("The stored id token is not a JWT"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| PlatformError::invalid_input(format!("Failed to decode id token: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| PlatformError::invalid_input(format!("Failed to parse id token claims: {e}")))
}

fn run_cubejs(command: &CubejsCommand, context: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let client = context.cube_client()?;
    match command {
        CubejsCommand::Run { query } => {
            let text = text_or_stdin(context, query.as_deref())?;
            let query: Value = serde_json::from_str(&text).map_err(|e| {
                PlatformError::invalid_input(format!("The query is not valid JSON: {e}"))
            })?;
            writeln!(out, "{}", repr(&client.load(&query)?))?;
        }
        CubejsCommand::Meta => {
            let meta = client.get("v1/meta")?;
            writeln!(out, "{}", cubejs::render_meta(&meta)?)?;
        }
        CubejsCommand::ResourceCounts => {
            let response = client.load(&cubejs::resource_counts_query())?;
            writeln!(out, "{}", cubejs::render_resource_counts(&response)?)?;
        }
    }
    Ok(())
}

fn text_or_stdin(context: &Context<'_>, text: Option<&str>) -> Result<String> {
    match text {
        Some(text) => Ok(text.to_owned()),
        None => context
            .system()
            .read_stdin()
            .context("Failed to read from stdin"),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_jwt_payload() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"email":"someone@example.com","exp":1700000000}"#);
        let token = format!("eyJhbGciOiJIUzI1NiJ9.{payload}.signature");
        assert_eq!(
            decode_claims(&token).unwrap(),
            json!({"email": "someone@example.com", "exp": 1_700_000_000})
        );
    }

    #[test]
    fn reject_non_jwt() {
        assert!(decode_claims("opaque-token").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
    }

    #[test]
    fn empty_optional_values_are_unset() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("idp"), Some("idp".to_owned()));
    }
}
