//! Authenticated JSON client for the wardrobe backend.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::error::{
    classify_transport_error, extract_error_message, ClosetError, ClosetResult, NetworkError,
};
use crate::traits::{Headers, HttpClient, Method, MultipartForm, Response};

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartForm),
}

/// Joins paths onto the base URL, signs requests with the session token and
/// turns responses into JSON or a [`ClosetError`].
///
/// A 401 answer clears the session that signed the request (see
/// [`SessionStore::expire_if`]) before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    session: Arc<SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        http: Arc<dyn HttpClient>,
        session: Arc<SessionStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Perform a request and return the decoded JSON body.
    ///
    /// An empty 2xx body decodes as `null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        extra_headers: Option<&Headers>,
    ) -> ClosetResult<Value> {
        let url = self.url(path);
        let sent_token = self.session.token();
        let headers = self.headers(body.as_ref(), extra_headers, sent_token.as_deref());

        tracing::debug!(%method, %url, "Sending request");

        let result = match (method, body) {
            (Method::Get, None) => self.http.get(&url, &headers).await,
            (Method::Delete, None) => self.http.delete(&url, &headers).await,
            (Method::Post, None) => self.http.post(&url, "", &headers).await,
            (Method::Post, Some(RequestBody::Json(value))) => {
                self.http.post(&url, &value.to_string(), &headers).await
            }
            (Method::Post, Some(RequestBody::Multipart(form))) => {
                self.http.post_multipart(&url, &form, &headers).await
            }
            (method, Some(_)) => {
                return Err(NetworkError::InvalidRequest {
                    message: format!("{} requests cannot carry a body", method),
                }
                .into())
            }
        };

        let response = result.map_err(|e| {
            tracing::debug!(%method, %url, error = %e, "Request failed without a response");
            ClosetError::from(classify_transport_error(&e, &url))
        })?;

        tracing::debug!(%method, %url, status = response.status, "Received response");
        self.handle_response(response, sent_token.as_deref()).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClosetResult<T> {
        let value = self.request(Method::Get, path, None, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClosetResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| NetworkError::InvalidRequest {
            message: format!("failed to encode request body: {}", e),
        })?;
        let value = self
            .request(Method::Post, path, Some(RequestBody::Json(body)), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> ClosetResult<T> {
        let value = self
            .request(Method::Post, path, Some(RequestBody::Multipart(form)), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> ClosetResult<Value> {
        self.request(Method::Delete, path, None, None).await
    }

    fn headers(
        &self,
        body: Option<&RequestBody>,
        extra: Option<&Headers>,
        token: Option<&str>,
    ) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if matches!(body, Some(RequestBody::Json(_))) {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(token) = token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        if let Some(extra) = extra {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }
        headers
    }

    async fn handle_response(
        &self,
        response: Response,
        sent_token: Option<&str>,
    ) -> ClosetResult<Value> {
        if response.status == 401 {
            self.session.expire_if(sent_token).await;
        }

        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: extract_error_message(&response.body),
            }
            .into());
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        response.json::<Value>().map_err(|e| {
            ClosetError::invalid_response(format!("response body is not JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
    use crate::auth::{Credentials, Session, SessionEvent};
    use crate::traits::HttpError;
    use bytes::Bytes;
    use serde_json::json;

    const BASE: &str = "http://backend";

    struct Fixture {
        http: MockHttpClient,
        creds: InMemoryCredentials,
        session: Arc<SessionStore>,
        api: ApiClient,
    }

    fn fixture() -> Fixture {
        let http = MockHttpClient::new();
        let creds = InMemoryCredentials::new();
        let session = Arc::new(SessionStore::new(Arc::new(creds.clone())));
        let api = ApiClient::new(format!("{}/", BASE), Arc::new(http.clone()), session.clone());
        Fixture {
            http,
            creds,
            session,
            api,
        }
    }

    #[test]
    fn test_url_joining() {
        let f = fixture();
        assert_eq!(f.api.base_url(), BASE);
        assert_eq!(f.api.url("/api/weather"), "http://backend/api/weather");
        assert_eq!(f.api.url("api/weather"), "http://backend/api/weather");
    }

    #[tokio::test]
    async fn test_headers_without_session() {
        let f = fixture();
        f.http
            .set_response("http://backend/api/weather", MockResponse::json(200, json!({})));

        f.api.request(Method::Get, "/api/weather", None, None).await.unwrap();

        let req = f.http.last_request().unwrap();
        assert_eq!(req.header("accept"), Some("application/json"));
        assert!(req.header("authorization").is_none());
        assert!(req.header("content-type").is_none());
    }

    #[tokio::test]
    async fn test_bearer_and_json_content_type() {
        let f = fixture();
        f.session.establish(Session::new("u1", "tok")).await;
        f.http
            .set_response("http://backend/api/x", MockResponse::json(200, json!({"ok": true})));

        let value: Value = f.api.post_json("/api/x", &json!({"a": 1})).await.unwrap();
        assert_eq!(value, json!({"ok": true}));

        let req = f.http.last_request().unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.json_body(), Some(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_multipart_has_no_json_content_type() {
        let f = fixture();
        f.http
            .set_response("http://backend/api/up", MockResponse::json(201, json!({})));

        let _: Value = f
            .api
            .post_multipart("/api/up", MultipartForm::new().text("k", "v"))
            .await
            .unwrap();

        let req = f.http.last_request().unwrap();
        assert!(req.header("content-type").is_none());
        assert_eq!(req.form.unwrap().field("k"), Some("v"));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let f = fixture();
        f.http.set_response("http://backend/api/d", MockResponse::empty(204));
        assert_eq!(f.api.delete("/api/d").await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_invalid_response() {
        let f = fixture();
        f.http.set_response(
            "http://backend/api/html",
            MockResponse::Success(Response::new(200, Bytes::from("<html>"))),
        );
        let err = f
            .api
            .request(Method::Get, "/api/html", None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClosetError::Network(NetworkError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_status_error_carries_backend_message() {
        let f = fixture();
        f.http.set_response(
            "http://backend/api/x",
            MockResponse::json(409, json!({"message": "Username already exists"})),
        );
        let err = f
            .api
            .request(Method::Get, "/api/x", None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClosetError::Network(NetworkError::HttpStatus {
                status: 409,
                message: "Username already exists".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_no_response() {
        let f = fixture();
        f.http.set_response(
            "http://backend/api/x",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        let err = f
            .api
            .request(Method::Get, "/api/x", None, None)
            .await
            .unwrap_err();
        match err {
            ClosetError::Network(net) => assert!(net.is_no_response()),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_storage() {
        let f = fixture();
        f.session.establish(Session::new("u1", "stale")).await;
        assert!(f.creds.get_credentials().is_some());
        let mut events = f.session.subscribe();

        f.http.set_response(
            "http://backend/api/x",
            MockResponse::json(401, json!({"message": "Token has expired"})),
        );
        let err = f
            .api
            .request(Method::Get, "/api/x", None, None)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.requires_reauth());
        assert!(!f.session.is_authenticated());
        assert_eq!(f.creds.get_credentials(), None::<Credentials>);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoginRequired);

        f.http.clear_requests();
        let _ = f.api.request(Method::Get, "/api/x", None, None).await;
        assert!(f.http.last_request().unwrap().header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_body_on_get_is_rejected() {
        let f = fixture();
        let err = f
            .api
            .request(Method::Get, "/api/x", Some(RequestBody::Json(json!({}))), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClosetError::Network(NetworkError::InvalidRequest { .. })
        ));
        assert_eq!(f.http.request_count(), 0);
    }

    #[tokio::test]
    async fn test_extra_headers_are_applied() {
        let f = fixture();
        f.http
            .set_response("http://backend/api/x", MockResponse::json(200, json!(null)));
        let mut extra = Headers::new();
        extra.insert("X-Trace".to_string(), "abc".to_string());

        f.api
            .request(Method::Get, "/api/x", None, Some(&extra))
            .await
            .unwrap();
        assert_eq!(f.http.last_request().unwrap().header("x-trace"), Some("abc"));
    }
}
