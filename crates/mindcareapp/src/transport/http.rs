use super::{Method, Request, Response, Transport};
use crate::error::{MindcareError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Blocking HTTP client for a real backend at `base_url`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MindcareError::TransportUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &Request) -> String {
        format!("{}{}", self.base_url, request.path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let url = self.url_for(request);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        if !request.body.is_null() {
            builder = builder.json(&request.body);
        }

        let response = builder.send().map_err(|e| {
            MindcareError::TransportUnavailable(format!("{} {}: {}", request.method, url, e))
        })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| MindcareError::TransportUnavailable(e.to_string()))?;
        debug!(%url, status, "network response");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(Response { status, body })
    }
}

/// The network when there is none: every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        Err(MindcareError::TransportUnavailable(format!(
            "no network configured for {} {}",
            request.method, request.path
        )))
    }
}
