//! Base-URL-bound client for one resource collection.

use std::sync::Arc;

use serde_json::Value;

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};

/// Client that resolves relative paths against a fixed base URL.
///
/// `ResourceClient::new(urls.sports(), transport).get("basketball_5x5")`
/// requests `{host}/sports/basketball_5x5`.
#[derive(Clone)]
pub struct ResourceClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl ResourceClient {
    /// Creates a client for `base_url`.
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL; an empty path addresses the base.
    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// `GET {base}/{path}`
    pub async fn get(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(Method::Get, path, None).await
    }

    /// `POST {base}/{path}` with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        self.send(Method::Post, path, Some(body)).await
    }

    /// `PUT {base}/{path}` with a JSON body.
    pub async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        self.send(Method::Put, path, Some(body)).await
    }

    /// `PATCH {base}/{path}` with a JSON body.
    pub async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        self.send(Method::Patch, path, Some(body)).await
    }

    /// `DELETE {base}/{path}`
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(Method::Delete, path, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, TransportError> {
        let request = ApiRequest::new(method, self.url_for(path), body);
        self.transport.send(&request).await
    }
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
