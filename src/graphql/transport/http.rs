//! Transport backed by `reqwest`'s blocking client

use super::{HttpRequest, HttpResponse, Method, Transport, USER_AGENT};
use crate::error::PlatformError;
use anyhow::Result;
use reqwest::blocking::Client;

/// Production transport
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be initialized
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PlatformError::transport(format!("Failed to initialize HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|e| {
            PlatformError::transport(format!("Unable to connect to {}: {e}", request.url))
        })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| {
            PlatformError::transport(format!(
                "Failed to read response body from {}: {e}",
                request.url
            ))
        })?;

        Ok(HttpResponse { status, body })
    }
}
