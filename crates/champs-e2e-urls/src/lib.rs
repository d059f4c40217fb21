#![warn(missing_docs)]
//! # champs-e2e-urls
//!
//! ## Purpose
//! Maps logical API resources to absolute endpoint URLs for contract tests.
//!
//! ## Responsibilities
//! - Hold the API base host chosen at startup.
//! - Expose collection URLs (`organizations`, `tournaments`, `sports`).
//! - Interpolate parent identifiers into nested resource paths.
//!
//! ## Data flow
//! Harness config -> [`ApiUrls::parse`] -> URL builders -> HTTP transport.
//!
//! ## Ownership and lifetimes
//! [`ApiUrls`] owns its host string; builders return fresh owned `String`s.
//!
//! ## Error model
//! Only host parsing can fail ([`UrlError`]). Path identifiers are never
//! validated or escaped: a malformed id yields a malformed URL and the HTTP
//! call reports the problem.
//!
//! ## Example
//! ```rust
//! use champs_e2e_urls::ApiUrls;
//!
//! let urls = ApiUrls::new("http://localhost:3000/api");
//! assert_eq!(
//!     urls.tournament_phases("t-1"),
//!     "http://localhost:3000/api/tournaments/t-1/phases"
//! );
//! ```

use thiserror::Error;
use url::Url;

/// Host used when no override is configured.
pub const DEFAULT_API_HOST: &str = "http://localhost:3000/api";

/// Top-level resource collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `/organizations`
    Organizations,
    /// `/tournaments`
    Tournaments,
    /// `/sports`
    Sports,
}

impl Resource {
    /// Every collection, in declaration order.
    pub const ALL: [Resource; 3] = [
        Resource::Organizations,
        Resource::Tournaments,
        Resource::Sports,
    ];

    /// Path segment used for the collection.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Organizations => "organizations",
            Resource::Tournaments => "tournaments",
            Resource::Sports => "sports",
        }
    }
}

/// Endpoint registry bound to one API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    host: String,
}

impl ApiUrls {
    /// Creates a registry without validating `host`.
    ///
    /// A single trailing `/` is dropped so joined paths never contain `//`.
    pub fn new(host: impl Into<String>) -> Self {
        let mut host = host.into();
        if host.ends_with('/') {
            host.pop();
        }
        Self { host }
    }

    /// Creates a registry after checking that `host` is an absolute
    /// `http`/`https` URL.
    ///
    /// # Errors
    /// Returns [`UrlError::InvalidHost`] when the host does not parse or uses
    /// another scheme.
    pub fn parse(host: &str) -> Result<Self, UrlError> {
        validate_host(host)?;
        Ok(Self::new(host))
    }

    /// Returns the configured base host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the collection URL for `resource`.
    pub fn collection(&self, resource: Resource) -> String {
        format!("{}/{}", self.host, resource.name())
    }

    /// `{host}/organizations`
    pub fn organizations(&self) -> String {
        self.collection(Resource::Organizations)
    }

    /// `{host}/tournaments`
    pub fn tournaments(&self) -> String {
        self.collection(Resource::Tournaments)
    }

    /// `{host}/sports`
    pub fn sports(&self) -> String {
        self.collection(Resource::Sports)
    }

    /// `{host}/sports/{sport_id}`
    pub fn sport(&self, sport_id: &str) -> String {
        format!("{}/{sport_id}", self.sports())
    }

    /// `{host}/tournaments/{tournament_id}`
    pub fn tournament(&self, tournament_id: &str) -> String {
        format!("{}/{tournament_id}", self.tournaments())
    }

    /// `{host}/tournaments/{tournament_id}/phases`
    pub fn tournament_phases(&self, tournament_id: &str) -> String {
        format!("{}/phases", self.tournament(tournament_id))
    }

    /// `{host}/tournaments/{tournament_id}/players`
    pub fn tournament_players(&self, tournament_id: &str) -> String {
        format!("{}/players", self.tournament(tournament_id))
    }

    /// `{host}/tournaments/{tournament_id}/players/{player_id}`
    pub fn tournament_player(&self, tournament_id: &str, player_id: &str) -> String {
        format!("{}/{player_id}", self.tournament_players(tournament_id))
    }

    /// `{host}/tournaments/{tournament_id}/teams`
    pub fn tournament_teams(&self, tournament_id: &str) -> String {
        format!("{}/teams", self.tournament(tournament_id))
    }

    /// `{host}/tournaments/{tournament_id}/phases/{phase_id}/rounds`
    pub fn phase_rounds(&self, tournament_id: &str, phase_id: &str) -> String {
        format!("{}/{phase_id}/rounds", self.tournament_phases(tournament_id))
    }

    /// `{host}/tournaments/{tournament_id}/phases/{phase_id}/draws`
    pub fn phase_draws(&self, tournament_id: &str, phase_id: &str) -> String {
        format!("{}/{phase_id}/draws", self.tournament_phases(tournament_id))
    }
}

impl Default for ApiUrls {
    fn default() -> Self {
        Self::new(DEFAULT_API_HOST)
    }
}

/// Checks that `host` is an absolute `http` or `https` URL.
///
/// # Errors
/// Returns [`UrlError::InvalidHost`] for unparsable hosts or other schemes.
pub fn validate_host(host: &str) -> Result<(), UrlError> {
    let parsed = Url::parse(host)
        .map_err(|error| UrlError::InvalidHost(format!("{host}: {error}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(UrlError::InvalidHost(format!(
            "{host}: scheme must be http or https, got {other}"
        ))),
    }
}

/// URL registry errors.
#[derive(Debug, Error)]
pub enum UrlError {
    /// Host is not a usable absolute HTTP(S) URL.
    #[error("invalid api host: {0}")]
    InvalidHost(String),
}
