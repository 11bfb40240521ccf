//! GraphQL executor
//!
//! Builds the request for a snippet, posts it with the bearer token and
//! classifies the response.

use super::builder::{self, RequestObject};
use super::registry::SnippetRegistry;
use super::snippet::SnippetDefinition;
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::PlatformError;
use anyhow::Result;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Message the API sends back in place of data once a token expired
pub const EXPIRED_TOKEN_MESSAGE: &str = "The incoming token has expired";

/// What to run
#[derive(Debug, Clone, Copy)]
pub enum SnippetRef<'a> {
    /// A registered snippet, by name
    Name(&'a str),
    Definition(&'a SnippetDefinition),
    /// Literal query text, sent as is
    AdHoc(&'a str),
}

/// Runs snippets against the GraphQL API
pub struct GraphQLExecutor<'a> {
    api: String,
    token: String,
    transport: &'a dyn Transport,
    registry: &'a SnippetRegistry,
}

impl<'a> GraphQLExecutor<'a> {
    /// Create an executor for `api`
    ///
    /// # Errors
    ///
    /// Returns a missing token error if `token` is absent or blank
    pub fn new(
        api: impl Into<String>,
        token: Option<String>,
        transport: &'a dyn Transport,
        registry: &'a SnippetRegistry,
    ) -> Result<Self, PlatformError> {
        let token = token
            .filter(|token| !token.trim().is_empty())
            .ok_or(PlatformError::MissingToken)?;
        Ok(Self {
            api: api.into(),
            token,
            transport,
            registry,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &'a SnippetRegistry {
        self.registry
    }

    #[must_use]
    pub fn api(&self) -> &str {
        &self.api
    }

    /// Run a snippet and return the decoded response
    ///
    /// A body carrying an `errors` array is returned as is; only the client
    /// layer turns it into an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the snippet is unknown, the request cannot be
    /// built, the transport fails, the status is an error without a GraphQL
    /// body, or the token was rejected
    pub fn run(&self, snippet: SnippetRef<'_>, variables: &Map<String, Value>) -> Result<Value> {
        let request = match snippet {
            SnippetRef::Name(name) => builder::build(self.registry.resolve(name)?, variables)?,
            SnippetRef::Definition(definition) => builder::build(definition, variables)?,
            SnippetRef::AdHoc(query) => builder::build_adhoc(query, variables)?,
        };
        self.send(&request)
    }

    /// Run a literal query
    ///
    /// # Errors
    ///
    /// See [`GraphQLExecutor::run`]
    pub fn run_query(&self, query: &str) -> Result<Value> {
        self.run(SnippetRef::AdHoc(query), &Map::new())
    }

    fn send(&self, request: &RequestObject) -> Result<Value> {
        let body = request.to_value();
        debug!(
            "Request: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );

        let http_request = HttpRequest::post_json(&self.api, &body)
            .with_header("Authorization", format!("Bearer {}", self.token));
        let response = self.transport.send(&http_request)?;

        classify(&response)
    }
}

/// Turn an HTTP response into decoded JSON or the matching error
///
/// # Errors
///
/// Returns a token expired error for 401/403 or the expiry sentinel, and a
/// transport error for undecodable bodies or error statuses without an
/// `errors` array
pub fn classify(response: &HttpResponse) -> Result<Value> {
    if matches!(response.status, 401 | 403) {
        debug!("Response status {}", response.status);
        return Err(PlatformError::TokenExpired.into());
    }

    let value: Value = serde_json::from_str(&response.body).map_err(|e| {
        PlatformError::transport(format!(
            "Failed to decode response (HTTP {}): {e}",
            response.status
        ))
    })?;
    debug!(
        "Response: {}",
        serde_json::to_string_pretty(&value).unwrap_or_default()
    );

    if is_expired_token(&value) {
        return Err(PlatformError::TokenExpired.into());
    }

    if !response.is_success() && value.get("errors").is_none() {
        return Err(PlatformError::transport(format!(
            "HTTP {}: {}",
            response.status, response.body
        ))
        .into());
    }

    Ok(value)
}

/// Whether a decoded body is exactly the expired token sentinel
#[must_use]
pub fn is_expired_token(value: &Value) -> bool {
    *value == json!({ "message": EXPIRED_TOKEN_MESSAGE })
}
