//! # Transport Layer
//!
//! Callers talk to "the API" through the [`Transport`] trait: hand it a
//! [`Request`], get back a [`Response`] or an error. Which transport answers
//! is decided once, when the [`ApiClient`] is built:
//!
//! ```text
//! caller ──► ApiClient ──► Interceptor (route matched) ──► Store
//!                 │
//!                 └──────► network transport (everything else)
//! ```
//!
//! - [`interceptor::Interceptor`] resolves the known `/api/...` routes from
//!   local storage and never touches the network.
//! - [`http::HttpTransport`] is a real HTTP client for a configured backend.
//! - [`http::OfflineTransport`] fails every request; it is the network when
//!   no backend is configured, which is the normal case for this app.
//!
//! A request the interceptor does not recognize always reaches the network
//! transport unchanged, so an unreachable network surfaces as
//! [`MindcareError::TransportUnavailable`](crate::error::MindcareError),
//! never as a fabricated response.

use crate::error::Result;
use crate::store::StorageBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

pub mod http;
pub mod interceptor;

pub use interceptor::Interceptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, Value::Null)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path, body)
    }

    pub fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self> {
        Ok(Self::post(path, serde_json::to_value(body)?))
    }

    /// The path without any query string or fragment.
    pub fn route_path(&self) -> &str {
        let end = self
            .path
            .find(|c: char| c == '?' || c == '#')
            .unwrap_or(self.path.len());
        &self.path[..end]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn with_status(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// Anything that can answer an API request.
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

/// The client every caller sends requests through.
///
/// Built once at startup. An [`Interceptor`] installed on the client answers
/// the routes it knows; everything else goes to the network transport.
pub struct ApiClient<B: StorageBackend> {
    network: Box<dyn Transport>,
    interceptor: Option<Interceptor<B>>,
}

impl<B: StorageBackend> ApiClient<B> {
    pub fn new(network: impl Transport + 'static) -> Self {
        Self {
            network: Box::new(network),
            interceptor: None,
        }
    }

    /// A client with no network at all: only intercepted routes succeed.
    pub fn offline() -> Self {
        Self::new(http::OfflineTransport)
    }

    /// Installs the interceptor. Returns `false` and leaves the existing one
    /// in place if this client already has one, so a repeated install never
    /// registers the routes twice.
    pub fn install(&mut self, interceptor: Interceptor<B>) -> bool {
        if self.interceptor.is_some() {
            debug!("interceptor already installed, ignoring");
            return false;
        }
        self.interceptor = Some(interceptor);
        true
    }

    pub fn with_interceptor(mut self, interceptor: Interceptor<B>) -> Self {
        self.install(interceptor);
        self
    }

    pub fn is_intercepted(&self) -> bool {
        self.interceptor.is_some()
    }
}

impl<B: StorageBackend> Transport for ApiClient<B> {
    fn send(&self, request: &Request) -> Result<Response> {
        if let Some(interceptor) = &self.interceptor {
            if let Some(response) = interceptor.handle(request) {
                return Ok(response);
            }
        }
        debug!(method = %request.method, path = %request.path, "passing request to network");
        self.network.send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MindcareError;
    use crate::model::StorageKey;
    use crate::store::mem_backend::MemBackend;
    use crate::store::Store;
    use crate::test_utils::RecordingTransport;
    use serde_json::json;

    #[test]
    fn test_route_path_strips_query() {
        assert_eq!(Request::get("/api/mood?limit=5").route_path(), "/api/mood");
        assert_eq!(Request::get("/api/mood#top").route_path(), "/api/mood");
        assert_eq!(Request::get("/api/mood").route_path(), "/api/mood");
    }

    #[test]
    fn test_offline_client_fails_unknown_routes() {
        let client: ApiClient<MemBackend> = ApiClient::offline();
        let err = client.send(&Request::get("/api/mood")).unwrap_err();
        assert!(matches!(err, MindcareError::TransportUnavailable(_)));
    }

    #[test]
    fn test_intercepted_route_never_reaches_network() {
        let store = Store::new(MemBackend::new());
        let network = RecordingTransport::new();
        let mut client = ApiClient::new(network.clone());
        client.install(Interceptor::new(store));

        let response = client.send(&Request::get("/api/mood")).unwrap();
        assert_eq!(response.body, json!([]));
        assert_eq!(network.calls(), 0);
    }

    #[test]
    fn test_unrecognized_request_falls_through_unchanged() {
        let store = Store::new(MemBackend::new());
        let network = RecordingTransport::new();
        let mut client = ApiClient::new(network.clone());
        client.install(Interceptor::new(store));

        let request = Request::post("/api/appointments", json!({"slot": 3}));
        client.send(&request).unwrap();
        client.send(&Request::get("/health")).unwrap();

        assert_eq!(network.calls(), 2);
        assert_eq!(network.requests()[0], request);
    }

    #[test]
    fn test_install_twice_keeps_single_interceptor() {
        let store = Store::new(MemBackend::new());
        let mut client: ApiClient<MemBackend> = ApiClient::offline();
        assert!(client.install(Interceptor::new(store.clone())));
        assert!(!client.install(Interceptor::new(store.clone())));

        let post = json!({"title": "t", "content": "c", "date": "2024-01-01T00:00:00Z", "nickname": "Anon"});
        client
            .send(&Request::post("/api/community/post", post))
            .unwrap();

        let posts: Vec<Value> = store.read(StorageKey::Posts, Vec::new());
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_response_success_range() {
        assert!(Response::ok(Value::Null).is_success());
        assert!(Response::with_status(204, Value::Null).is_success());
        assert!(!Response::with_status(404, Value::Null).is_success());
        assert!(!Response::with_status(500, Value::Null).is_success());
    }
}
