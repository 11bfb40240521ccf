//! Mock transport for testing

#![expect(clippy::module_name_repetitions)]

use super::{HttpRequest, HttpResponse, Transport};
use anyhow::{Result, bail};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Replays queued responses in order and records every request
///
/// Sending with an empty queue fails, so a test can assert that no request
/// beyond the expected ones was made.
///
/// # Example
/// ```
/// use stacklet_admin::graphql::transport::{HttpRequest, MockTransport, Transport};
/// use serde_json::json;
///
/// let transport = MockTransport::new().with_json(200, &json!({"data": {}}));
/// let response = transport.send(&HttpRequest::get("https://api")).unwrap();
/// assert_eq!(response.status, 200);
/// assert!(transport.send(&HttpRequest::get("https://api")).is_err());
/// assert_eq!(transport.requests().len(), 2);
/// ```
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response (builder pattern)
    #[must_use]
    pub fn with_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(HttpResponse::new(status, body));
        self
    }

    /// Queue a JSON response (builder pattern)
    #[must_use]
    pub fn with_json(self, status: u16, body: &Value) -> Self {
        self.with_response(status, body.to_string())
    }

    /// Every request sent so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of queued responses not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(response) => Ok(response),
            None => bail!("No response queued for {}", request.url),
        }
    }
}
