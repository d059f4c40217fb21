//! HTTP transport seam and its reqwest implementation.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use thiserror::Error;

/// HTTP verbs used by contract scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// `GET url`
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    /// `POST url` with a JSON body.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }

    /// Request with an arbitrary verb and optional body.
    pub fn new(method: Method, url: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            url: url.into(),
            body,
        }
    }
}

/// Status code and decoded body of one response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body. Non-JSON text becomes a JSON string, empty bodies `null`.
    pub body: Value,
}

/// Abstract HTTP client used by contract scenarios.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request and returns the raw status and decoded body.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest defaults and no auth header.
    ///
    /// # Errors
    /// Returns [`TransportError::Build`] when the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_headers(None, &[])
    }

    /// Creates a transport that attaches `Authorization: Bearer <token>` and
    /// the given extra headers to every request.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidHeader`] for header names or values
    /// that are not valid HTTP, and [`TransportError::Build`] when the client
    /// cannot be created.
    pub fn with_headers(
        bearer_token: Option<&str>,
        headers: &[(String, String)],
    ) -> Result<Self, TransportError> {
        let mut defaults = HeaderMap::new();

        if let Some(token) = bearer_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| TransportError::InvalidHeader(AUTHORIZATION.to_string()))?;
            value.set_sensitive(true);
            defaults.insert(AUTHORIZATION, value);
        }

        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            defaults.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(defaults)
            .build()
            .map_err(|error| TransportError::Build(error.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|error| {
            tracing::warn!(method = %request.method, url = %request.url, %error, "request failed");
            TransportError::Request(error.to_string())
        })?;

        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|error| TransportError::Body(error.to_string()))?;

        tracing::info!(method = %request.method, url = %request.url, status, "response received");

        Ok(ApiResponse {
            status,
            body: decode_body(&raw),
        })
    }
}

/// Decodes a response body into JSON without failing.
///
/// Empty bodies become `null` and non-JSON text becomes a JSON string, so
/// the schema assertion reports the mismatch instead of the transport.
pub fn decode_body(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS, TLS, or timeout failure.
    #[error("request failed: {0}")]
    Request(String),
    /// Response body could not be read.
    #[error("response body could not be read: {0}")]
    Body(String),
    /// Configured header is not valid HTTP.
    #[error("invalid header `{0}`")]
    InvalidHeader(String),
    /// HTTP client could not be constructed.
    #[error("http client build failure: {0}")]
    Build(String),
}
