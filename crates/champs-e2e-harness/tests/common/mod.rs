//! Shared transports and schemas for harness integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use champs_e2e_harness::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use champs_e2e_schema::SchemaRegistry;
use serde_json::{Value, json};

/// Answers every request with the same status and body, recording requests.
#[allow(dead_code)]
#[derive(Debug)]
pub struct CannedTransport {
    status: u16,
    body: Value,
    requests: Mutex<Vec<ApiRequest>>,
}

#[allow(dead_code)]
impl CannedTransport {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("request log lock should work").clone()
    }
}

#[async_trait]
impl HttpTransport for CannedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .expect("request log lock should work")
            .push(request.clone());
        Ok(ApiResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Fails every request as if the host were unreachable.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct UnreachableTransport;

#[async_trait]
impl HttpTransport for UnreachableTransport {
    async fn send(&self, _request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        Err(TransportError::Request("connection refused".to_string()))
    }
}

/// Small registry with a `Team` definition requiring `name`.
#[allow(dead_code)]
pub fn team_registry() -> SchemaRegistry {
    SchemaRegistry::from_document(json!({
        "definitions": {
            "Team": {
                "type": "object",
                "required": ["name"],
                "properties": { "name": { "type": "string" } }
            },
            "TeamResponse": {
                "type": "object",
                "required": ["team"],
                "properties": { "team": { "$ref": "#/definitions/Team" } }
            }
        }
    }))
    .expect("team registry should load")
}
