//! Mock HTTP client for testing.
//!
//! Returns configured responses or errors and records every request.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Method, MultipartForm, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    /// JSON body, for `post`
    pub body: Option<String>,
    /// Form, for `post_multipart`
    pub form: Option<MultipartForm>,
}

impl RecordedRequest {
    /// Look up a header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parse the recorded JSON body.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (of any status)
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
}

impl MockResponse {
    /// A response whose body is the given JSON value.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// A response with an empty body.
    pub fn empty(status: u16) -> Self {
        MockResponse::Success(Response::new(status, bytes::Bytes::new()))
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by method and URL, then by URL for any method,
/// then by URL prefix, then the default.
///
/// # Example
///
/// ```ignore
/// use closet::adapters::mock::{MockHttpClient, MockResponse};
/// use closet::traits::{Headers, HttpClient, Method};
///
/// let client = MockHttpClient::new();
/// client.set_method_response(
///     Method::Get,
///     "http://backend/api/weather",
///     MockResponse::json(200, json!({"temp": 10})),
/// );
///
/// let response = client.get("http://backend/api/weather", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.request_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by (method, URL); `None` matches any method
    responses: Arc<Mutex<HashMap<(Option<Method>, String), MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a URL, regardless of method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert((None, url.to_string()), response);
    }

    /// Set a response for one method on a URL.
    pub fn set_method_response(&self, method: Method, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert((Some(method), url.to_string()), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Recorded requests to one method and URL.
    pub fn requests_to(&self, method: Method, url: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .cloned()
            .collect()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        self.responses.lock().unwrap().clear();
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }

    fn respond(&self, method: Method, url: &str) -> Result<Response, HttpError> {
        match self.lookup(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            ))),
        }
    }

    fn lookup(&self, method: Method, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(&(Some(method), url.to_string())) {
            return Some(response.clone());
        }
        if let Some(response) = responses.get(&(None, url.to_string())) {
            return Some(response.clone());
        }

        // Prefix match, longest pattern first so specific routes win
        let mut prefixed: Vec<_> = responses
            .iter()
            .filter(|((m, pattern), _)| {
                m.map_or(true, |m| m == method) && url.starts_with(pattern.as_str())
            })
            .collect();
        prefixed.sort_by_key(|((_, pattern), _)| std::cmp::Reverse(pattern.len()));
        if let Some((_, response)) = prefixed.first() {
            return Some((*response).clone());
        }

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record(RecordedRequest {
            method: Method::Get,
            url: url.to_string(),
            headers: headers.clone(),
            body: None,
            form: None,
        });
        self.respond(Method::Get, url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record(RecordedRequest {
            method: Method::Post,
            url: url.to_string(),
            headers: headers.clone(),
            body: Some(body.to_string()),
            form: None,
        });
        self.respond(Method::Post, url)
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: &MultipartForm,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record(RecordedRequest {
            method: Method::Post,
            url: url.to_string(),
            headers: headers.clone(),
            body: None,
            form: Some(form.clone()),
        });
        self.respond(Method::Post, url)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record(RecordedRequest {
            method: Method::Delete,
            url: url.to_string(),
            headers: headers.clone(),
            body: None,
            form: None,
        });
        self.respond(Method::Delete, url)
    }
}
