//! Environment-derived harness configuration.

use std::fmt;
use std::path::PathBuf;

use champs_e2e_urls::{ApiUrls, DEFAULT_API_HOST, UrlError, validate_host};
use thiserror::Error;

use crate::logging::DEFAULT_LOG_FILTER;
use crate::transport::{ReqwestTransport, TransportError};

/// Overrides the API base URL.
pub const HOST_ENV: &str = "CHAMPS_API_HOST";
/// Optional bearer token attached to every request.
pub const TOKEN_ENV: &str = "CHAMPS_API_TOKEN";
/// Path of the schema document.
pub const SCHEMA_PATH_ENV: &str = "CHAMPS_SCHEMA_PATH";
/// Tracing filter directive.
pub const LOG_ENV: &str = "CHAMPS_LOG";
/// Existing tournament used by player round-trip scenarios.
pub const TOURNAMENT_ENV: &str = "CHAMPS_TOURNAMENT_ID";

/// Schema document used when [`SCHEMA_PATH_ENV`] is unset.
pub const DEFAULT_SCHEMA_PATH: &str = "contracts/sport_swagger.json";

/// Harness settings resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// API base URL.
    pub api_host: String,
    /// Bearer token, if the backend requires one.
    pub api_token: Option<String>,
    /// Schema document path.
    pub schema_path: PathBuf,
    /// Tracing filter directive.
    pub log_filter: String,
    /// Tournament for player scenarios; those scenarios are skipped without it.
    pub tournament_id: Option<String>,
}

impl HarnessConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    /// See [`Self::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHost`] when the host is not an absolute
    /// `http`/`https` URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_host = read(HOST_ENV).unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        validate_host(&api_host)?;

        Ok(Self {
            api_host,
            api_token: read(TOKEN_ENV),
            schema_path: read(SCHEMA_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_PATH)),
            log_filter: read(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            tournament_id: read(TOURNAMENT_ENV),
        })
    }

    /// Endpoint registry bound to the configured host.
    pub fn urls(&self) -> ApiUrls {
        ApiUrls::new(self.api_host.clone())
    }

    /// Reqwest transport carrying the configured token.
    ///
    /// # Errors
    /// Returns [`ConfigError::Transport`] when the token is not a valid header
    /// value or the client cannot be built.
    pub fn transport(&self) -> Result<ReqwestTransport, ConfigError> {
        Ok(ReqwestTransport::with_headers(self.api_token.as_deref(), &[])?)
    }
}

impl fmt::Debug for HarnessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarnessConfig")
            .field("api_host", &self.api_host)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "<redacted>"),
            )
            .field("schema_path", &self.schema_path)
            .field("log_filter", &self.log_filter)
            .field("tournament_id", &self.tournament_id)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API host is unusable.
    #[error(transparent)]
    InvalidHost(#[from] UrlError),
    /// Transport could not be built from the configuration.
    #[error("transport configuration failure: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for environment lookup semantics.

    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_local_defaults() {
        let config = HarnessConfig::from_lookup(lookup(&[])).expect("defaults should load");
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.schema_path, PathBuf::from(DEFAULT_SCHEMA_PATH));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.api_token.is_none());
        assert!(config.tournament_id.is_none());
    }

    #[test]
    fn host_override_and_blank_values() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (HOST_ENV, " https://api.example.test/api "),
            (TOKEN_ENV, "   "),
            (TOURNAMENT_ENV, "t-1"),
        ]))
        .expect("override should load");
        assert_eq!(config.api_host, "https://api.example.test/api");
        assert!(config.api_token.is_none());
        assert_eq!(config.tournament_id.as_deref(), Some("t-1"));
        assert_eq!(config.urls().sports(), "https://api.example.test/api/sports");
    }

    #[test]
    fn rejects_unusable_hosts() {
        assert!(matches!(
            HarnessConfig::from_lookup(lookup(&[(HOST_ENV, "localhost:3000")])),
            Err(ConfigError::InvalidHost(_))
        ));
    }

    #[test]
    fn transport_rejects_unusable_token() {
        let config = HarnessConfig {
            api_token: Some("bad\ntoken".to_string()),
            ..HarnessConfig::from_lookup(lookup(&[])).expect("defaults should load")
        };
        assert!(matches!(
            config.transport(),
            Err(ConfigError::Transport(TransportError::InvalidHeader(_)))
        ));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = HarnessConfig::from_lookup(lookup(&[(TOKEN_ENV, "secret-token")]))
            .expect("config should load");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret-token"));
    }
}
