//! Derive a configuration from a live console
//!
//! The console serves `config/cognito.json` and `config/cubejs.json`; their
//! merged contents are mapped onto [`PlatformConfig`].

use super::PlatformConfig;
use crate::error::PlatformError;
use crate::graphql::transport::{HttpRequest, Transport};
use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Files fetched from the console, in order
pub const CONFIG_PATHS: [&str; 2] = ["config/cognito.json", "config/cubejs.json"];

/// Scheme and host of a console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleHost {
    pub scheme: String,
    pub host: String,
}

impl ConsoleHost {
    /// Resolve the console from either a URL or a deployment prefix
    ///
    /// A prefix maps to `console.<prefix>.stacklet.io`. A URL may omit the
    /// scheme (`https` is assumed) and the `console.` label.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error unless exactly one of `url` and
    /// `prefix` is given, or if the URL has no host
    pub fn resolve(url: Option<&str>, prefix: Option<&str>) -> Result<Self, PlatformError> {
        match (url, prefix) {
            (Some(_), Some(_)) => Err(PlatformError::invalid_input(
                "Cannot specify both --url and --prefix. Please provide one or the other.",
            )),
            (None, None) => Err(PlatformError::invalid_input(
                "Must specify either --url or --prefix.",
            )),
            (None, Some(prefix)) => Ok(Self {
                scheme: "https".to_owned(),
                host: format!("console.{prefix}.stacklet.io"),
            }),
            (Some(url), None) => Self::from_url(url),
        }
    }

    fn from_url(url: &str) -> Result<Self, PlatformError> {
        let (scheme, host) = if url.contains("://") {
            let parsed = Url::parse(url)
                .map_err(|e| PlatformError::invalid_input(format!("Invalid URL '{url}': {e}")))?;
            let host = parsed
                .host_str()
                .ok_or_else(|| PlatformError::invalid_input(format!("URL has no host: {url}")))?;
            let host = match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_owned(),
            };
            (parsed.scheme().to_owned(), host)
        } else {
            let host = url.split('/').next().unwrap_or_default();
            ("https".to_owned(), host.to_owned())
        };

        if host.is_empty() {
            return Err(PlatformError::invalid_input(format!("URL has no host: {url}")));
        }

        let host = if host.starts_with("console") {
            host
        } else {
            format!("console.{host}")
        };
        Ok(Self { scheme, host })
    }

    /// URL of a file served by the console
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}://{}/{path}", self.scheme, self.host)
    }
}

/// Fetch and merge the console's configuration documents
///
/// # Errors
///
/// Returns a transport error if a document cannot be fetched, answers with
/// an error status, or is not a JSON object
pub fn fetch_details(transport: &dyn Transport, console: &ConsoleHost) -> Result<Map<String, Value>> {
    let mut details = Map::new();
    for path in CONFIG_PATHS {
        let url = console.url_for(path);
        debug!("Fetching {url}");
        let response = transport.send(&HttpRequest::get(&url))?;
        if !response.is_success() {
            return Err(PlatformError::transport(format!(
                "Unable to retrieve configuration details from {url}\nHTTP {}",
                response.status
            ))
            .into());
        }
        let value: Value = serde_json::from_str(&response.body).map_err(|e| {
            PlatformError::transport(format!(
                "Unable to parse configuration details from {url}\n{e}"
            ))
        })?;
        let Value::Object(document) = value else {
            return Err(PlatformError::transport(format!(
                "Unable to parse configuration details from {url}\nexpected a JSON object"
            ))
            .into());
        };
        details.extend(document);
    }
    Ok(details)
}

/// Map the console's configuration details onto a configuration
///
/// # Errors
///
/// Returns a configuration error if a required key is missing, and an
/// invalid input error if the identity provider cannot be chosen
pub fn derive_config(details: &Map<String, Value>, idp: Option<&str>) -> Result<PlatformConfig> {
    let auth_url = format!("https://{}", required(details, "cognito_install")?);
    let idp_id = select_idp(details, idp)?;

    Ok(PlatformConfig {
        api: auth_url.replace("auth.console", "api"),
        region: required(details, "cognito_user_pool_region")?.to_owned(),
        cognito_user_pool_id: required(details, "cognito_user_pool_id")?.to_owned(),
        cognito_client_id: required(details, "cognito_user_pool_client_id")?.to_owned(),
        cubejs: format!("https://{}", required(details, "cubejs_domain")?),
        auth_url: Some(auth_url),
        idp_id: (!idp_id.is_empty()).then_some(idp_id),
    })
}

fn required<'a>(details: &'a Map<String, Value>, key: &str) -> Result<&'a str, PlatformError> {
    details.get(key).and_then(Value::as_str).ok_or_else(|| {
        PlatformError::configuration(format!(
            "The configuration details are missing a required key: '{key}'"
        ))
    })
}

/// Choose the SAML identity provider id
///
/// Providers come from `saml_providers` (a list of `{name, idp_id}`) or the
/// legacy `saml` map of id to name. No provider yields an empty id, a single
/// one is used as is, several require `idp` to name one.
///
/// # Errors
///
/// Returns an invalid input error when several providers exist and `idp` is
/// missing or unknown
pub fn select_idp(details: &Map<String, Value>, idp: Option<&str>) -> Result<String, PlatformError> {
    let mut name_to_id: BTreeMap<String, String> = BTreeMap::new();

    if let Some(Value::Array(providers)) = details.get("saml_providers")
        && !providers.is_empty()
    {
        for provider in providers {
            if let (Some(name), Some(id)) = (
                provider.get("name").and_then(Value::as_str),
                provider.get("idp_id").and_then(Value::as_str),
            ) {
                name_to_id.insert(name.to_owned(), id.to_owned());
            }
        }
    } else if let Some(Value::Object(saml)) = details.get("saml") {
        for (id, name) in saml {
            if let Some(name) = name.as_str() {
                name_to_id.insert(name.to_owned(), id.clone());
            }
        }
    }

    let known = || name_to_id.keys().cloned().collect::<Vec<_>>().join(", ");
    match name_to_id.len() {
        0 => Ok(String::new()),
        1 => Ok(name_to_id.values().next().cloned().unwrap_or_default()),
        _ => {
            let Some(idp) = idp else {
                return Err(PlatformError::invalid_input(format!(
                    "Multiple identity providers available, specify one with --idp: {}",
                    known()
                )));
            };
            name_to_id.get(idp).cloned().ok_or_else(|| {
                PlatformError::invalid_input(format!(
                    "Unknown identity provider '{idp}', known names: {}",
                    known()
                ))
            })
        }
    }
}
