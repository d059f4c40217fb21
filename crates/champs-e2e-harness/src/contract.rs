//! Single contract scenario: request, status assertion, schema assertion.

use champs_e2e_payloads::PayloadError;
use champs_e2e_schema::{SchemaError, SchemaRegistry};
use serde_json::Value;
use thiserror::Error;

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// Status expected when a case does not say otherwise.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// One named contract scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCase {
    name: String,
    request: ApiRequest,
    expected_status: u16,
    definition: String,
}

impl ContractCase {
    /// Creates a case expecting `200` and a body matching `definition`.
    pub fn new(name: impl Into<String>, request: ApiRequest, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request,
            expected_status: DEFAULT_EXPECTED_STATUS,
            definition: definition.into(),
        }
    }

    /// Overrides the expected status code.
    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Scenario name used in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request the case sends.
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Status the response must carry.
    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }

    /// Schema definition the body must satisfy.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Sends the request once and checks status, then schema.
    ///
    /// Returns the response on success so callers can chain scenarios.
    ///
    /// # Errors
    /// - [`ContractFailure::Transport`] when the call itself fails.
    /// - [`ContractFailure::StatusMismatch`] when the status differs; the body
    ///   is not schema-checked in that case.
    /// - [`ContractFailure::Schema`] when the body violates the definition or
    ///   the definition cannot be compiled.
    pub async fn run<T>(
        &self,
        transport: &T,
        registry: &SchemaRegistry,
    ) -> Result<ApiResponse, ContractFailure>
    where
        T: HttpTransport + ?Sized,
    {
        tracing::info!(case = %self.name, method = %self.request.method, url = %self.request.url, "contract case started");

        let response = transport
            .send(&self.request)
            .await
            .map_err(|source| ContractFailure::Transport {
                case: self.name.clone(),
                source,
            })?;

        if response.status != self.expected_status {
            tracing::warn!(case = %self.name, expected = self.expected_status, actual = response.status, "status mismatch");
            return Err(ContractFailure::StatusMismatch {
                case: self.name.clone(),
                expected: self.expected_status,
                actual: response.status,
                body: response.body,
            });
        }

        registry
            .validate(&self.definition, &response.body)
            .map_err(|source| {
                tracing::warn!(case = %self.name, definition = %self.definition, %source, "schema mismatch");
                ContractFailure::Schema {
                    case: self.name.clone(),
                    source,
                }
            })?;

        tracing::info!(case = %self.name, "contract case passed");
        Ok(response)
    }
}

/// Reason a contract scenario failed.
#[derive(Debug, Error)]
pub enum ContractFailure {
    /// Network or client failure before a response arrived.
    #[error("[{case}] transport failure: {source}")]
    Transport {
        /// Scenario name.
        case: String,
        /// Underlying transport error.
        source: TransportError,
    },
    /// Response status differs from the expected literal.
    #[error("[{case}] expected status {expected}, got {actual}")]
    StatusMismatch {
        /// Scenario name.
        case: String,
        /// Expected status.
        expected: u16,
        /// Actual status.
        actual: u16,
        /// Response body, kept for diagnostics.
        body: Value,
    },
    /// Response body failed the schema assertion.
    #[error("[{case}] {source}")]
    Schema {
        /// Scenario name.
        case: String,
        /// Schema error.
        source: SchemaError,
    },
    /// Request body could not be built.
    #[error("[{case}] payload failure: {source}")]
    Payload {
        /// Scenario name.
        case: String,
        /// Payload error.
        source: PayloadError,
    },
    /// Response lacks a field a chained scenario needs.
    #[error("[{case}] response has no value at {pointer}")]
    MissingField {
        /// Scenario name.
        case: String,
        /// JSON pointer that was looked up.
        pointer: String,
    },
    /// A reference field changed between write and read.
    #[error("[{case}] {field} expected {expected:?}, got {actual:?}")]
    ReferenceMismatch {
        /// Scenario name.
        case: String,
        /// Field name.
        field: String,
        /// Value that was sent.
        expected: String,
        /// Value that came back.
        actual: String,
    },
}

impl ContractFailure {
    /// Scenario that failed.
    pub fn case(&self) -> &str {
        match self {
            Self::Transport { case, .. }
            | Self::StatusMismatch { case, .. }
            | Self::Schema { case, .. }
            | Self::Payload { case, .. }
            | Self::MissingField { case, .. }
            | Self::ReferenceMismatch { case, .. } => case,
        }
    }

    /// Returns `true` for status mismatches.
    pub fn is_status_mismatch(&self) -> bool {
        matches!(self, Self::StatusMismatch { .. })
    }

    /// Returns `true` when the body violated its schema definition.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Self::Schema {
                source: SchemaError::Violation { .. },
                ..
            }
        )
    }
}
