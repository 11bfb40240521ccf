//! cube.js analytics API
//!
//! Unlike the GraphQL API, cube.js expects the bare token in the
//! `Authorization` header.

use crate::error::PlatformError;
use crate::graphql::transport::{HttpRequest, HttpResponse, Transport};
use crate::output::repr;
use anyhow::Result;
use serde_json::{Map, Value, json};
use std::fmt::Write as _;
use tracing::debug;

/// Client for one cube.js deployment
pub struct CubeClient<'a> {
    base: String,
    token: String,
    transport: &'a dyn Transport,
}

impl<'a> CubeClient<'a> {
    /// Create a client for the configured `cubejs` endpoint
    ///
    /// # Errors
    ///
    /// Returns a missing token error if `token` is absent or blank
    pub fn new(
        cubejs: &str,
        token: Option<String>,
        transport: &'a dyn Transport,
    ) -> Result<Self, PlatformError> {
        let token = token
            .filter(|token| !token.trim().is_empty())
            .ok_or(PlatformError::MissingToken)?;
        Ok(Self {
            base: base_url(cubejs),
            token,
            transport,
        })
    }

    /// Full URL of an API path such as `v1/meta`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/cubejs-api/{path}", self.base)
    }

    /// Run a query through `v1/load`
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails or the answer is not JSON
    pub fn load(&self, query: &Value) -> Result<Value> {
        let request = HttpRequest::post_json(self.endpoint("v1/load"), &json!({ "query": query }))
            .with_header("Authorization", self.token.clone());
        self.send(&request)
    }

    /// GET an API path
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails or the answer is not JSON
    pub fn get(&self, path: &str) -> Result<Value> {
        let request = HttpRequest::get(self.endpoint(path))
            .with_header("Authorization", self.token.clone())
            .with_header("Content-Type", "application/json");
        self.send(&request)
    }

    fn send(&self, request: &HttpRequest) -> Result<Value> {
        debug!("cube.js request to {}", request.url);
        let response = self.transport.send(request)?;
        decode(&response)
    }
}

fn decode(response: &HttpResponse) -> Result<Value> {
    if matches!(response.status, 401 | 403) {
        return Err(PlatformError::TokenExpired.into());
    }
    let value: Value = serde_json::from_str(&response.body).map_err(|e| {
        PlatformError::transport(format!(
            "Failed to decode cube.js response (HTTP {}): {e}",
            response.status
        ))
    })?;
    if !response.is_success() {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .map_or_else(|| response.body.clone(), str::to_owned);
        return Err(PlatformError::transport(format!("HTTP {}: {message}", response.status)).into());
    }
    Ok(value)
}

/// Base URL for a configured endpoint, `https://` unless a scheme is given
#[must_use]
pub fn base_url(cubejs: &str) -> String {
    let trimmed = cubejs.trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

/// Daily resource counts over the last 30 days, newest first
#[must_use]
pub fn resource_counts_query() -> Value {
    json!({
        "measures": ["ResourceCounts.count"],
        "timeDimensions": [{
            "dimension": "ResourceCounts.date",
            "granularity": "day",
            "dateRange": "Last 30 days",
        }],
        "order": [["ResourceCounts.date", "desc"]],
        "dimensions": [],
    })
}

/// One `name:` block per cube, sorted by name, with the rest of the cube indented below
///
/// # Errors
///
/// Returns a transport error if the answer has no `cubes` list
pub fn render_meta(meta: &Value) -> Result<String> {
    let cubes = meta
        .get("cubes")
        .and_then(Value::as_array)
        .ok_or_else(|| PlatformError::transport("cube.js metadata has no 'cubes' list"))?;

    let mut named: Vec<(String, Map<String, Value>)> = cubes
        .iter()
        .filter_map(Value::as_object)
        .map(|cube| {
            let name = match cube.get("name") {
                Some(Value::String(name)) => name.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            let rest = cube
                .iter()
                .filter(|(key, _)| key.as_str() != "name")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            (name, rest)
        })
        .collect();
    named.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::new();
    for (name, cube) in named {
        let _ = writeln!(out, "{name}:\n    {}\n", repr(&Value::Object(cube)));
    }
    Ok(out.trim_end_matches('\n').to_owned())
}

/// `YYYY-MM-DD: count` per row of a resource counts answer
///
/// # Errors
///
/// Returns a transport error if the answer has no `data` list
pub fn render_resource_counts(response: &Value) -> Result<String> {
    let rows = response
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| PlatformError::transport("cube.js response has no 'data' list"))?;

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let date = row
                .get("ResourceCounts.date")
                .and_then(Value::as_str)
                .map(|date| date.get(..10).unwrap_or(date))
                .unwrap_or_default();
            let count = match row.get("ResourceCounts.count") {
                Some(Value::String(count)) => count.clone(),
                Some(count) => count.to_string(),
                None => String::new(),
            };
            format!("{date}: {count}")
        })
        .collect();
    Ok(lines.join("\n"))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::graphql::transport::{Method, MockTransport};

    #[test]
    fn base_url_defaults_to_https() {
        assert_eq!(base_url("cubejs.example.io"), "https://cubejs.example.io");
        assert_eq!(base_url("http://localhost:4000/"), "http://localhost:4000");
    }

    #[test]
    fn missing_token() {
        let transport = MockTransport::new();
        assert!(matches!(
            CubeClient::new("cubejs.example.io", None, &transport),
            Err(PlatformError::MissingToken)
        ));
    }

    #[test]
    fn load_posts_query_with_bare_token() {
        let transport = MockTransport::new().with_json(200, &json!({"data": []}));
        let client = CubeClient::new("cubejs.example.io", Some("tok".to_owned()), &transport).unwrap();

        client.load(&resource_counts_query()).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://cubejs.example.io/cubejs-api/v1/load");
        assert_eq!(requests[0].header("authorization"), Some("tok"));
        assert_eq!(
            requests[0].json().unwrap()["query"]["measures"],
            json!(["ResourceCounts.count"])
        );
    }

    #[test]
    fn error_status_is_a_transport_error() {
        let transport = MockTransport::new().with_json(400, &json!({"error": "bad query"}));
        let client = CubeClient::new("https://c", Some("tok".to_owned()), &transport).unwrap();
        let err = client.load(&json!({})).unwrap_err();
        assert!(err.to_string().contains("bad query"));
    }

    #[test]
    fn meta_sorted_by_name() {
        let meta = json!({"cubes": [
            {"name": "Zeta", "title": "Z"},
            {"name": "Alpha", "title": "A", "measures": []},
        ]});
        assert_eq!(
            render_meta(&meta).unwrap(),
            "Alpha:\n    {'title': 'A', 'measures': []}\n\nZeta:\n    {'title': 'Z'}"
        );
    }

    #[test]
    fn resource_counts_lines() {
        let response = json!({"data": [
            {"ResourceCounts.date": "2024-03-02T00:00:00.000", "ResourceCounts.count": "42"},
            {"ResourceCounts.date": "2024-03-01T00:00:00.000", "ResourceCounts.count": 7},
        ]});
        assert_eq!(
            render_resource_counts(&response).unwrap(),
            "2024-03-02: 42\n2024-03-01: 7"
        );
        assert!(render_resource_counts(&json!({"error": "x"})).is_err());
    }
}
