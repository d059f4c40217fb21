#![warn(missing_docs)]
//! # champs-e2e-payloads
//!
//! ## Purpose
//! Builds randomized, schema-valid request bodies for tournament resources.
//!
//! ## Responsibilities
//! - Generate non-colliding free-text values.
//! - Wrap each resource record in the envelope key the API expects.
//! - Copy caller-supplied reference ids verbatim.
//!
//! ## Data flow
//! Scenario supplies parent ids -> factory function -> envelope struct ->
//! [`Payload::to_json`] -> HTTP request body.
//!
//! ## Ownership and lifetimes
//! Every factory call returns a new owned value; nothing is cached.
//!
//! ## Error model
//! Factories are infallible. JSON conversion returns [`PayloadError`].
//!
//! ## Example
//! ```rust
//! use champs_e2e_payloads::{Payload, tournament_player_payload};
//!
//! let body = tournament_player_payload("t-1").to_json().unwrap();
//! assert_eq!(body["player"]["tournament_id"], "t-1");
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Shirt number used by every generated player.
pub const DEFAULT_SHIRT_NUMBER: u32 = 10;

const RANDOM_BODY_LEN: usize = 12;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns a nonempty alphanumeric string.
///
/// A fixed-length random body is followed by a process-wide counter, so two
/// calls in the same run never return the same value.
pub fn random_string() -> String {
    let body: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_BODY_LEN)
        .map(char::from)
        .collect();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{body}{sequence}")
}

/// Request body that serializes to JSON.
pub trait Payload: Serialize {
    /// Converts the payload into a JSON value.
    ///
    /// # Errors
    /// Returns [`PayloadError::Codec`] when serialization fails.
    fn to_json(&self) -> Result<Value, PayloadError> {
        serde_json::to_value(self).map_err(PayloadError::Codec)
    }
}

/// Player record without a team reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Facebook handle.
    pub facebook: String,
    /// Instagram handle.
    pub instagram: String,
    /// Display name.
    pub name: String,
    /// Owning tournament.
    pub tournament_id: String,
    /// Twitter handle.
    pub twitter: String,
    /// Account username.
    pub username: String,
    /// Name printed on the shirt.
    pub shirt_name: String,
    /// Shirt number.
    pub shirt_number: u32,
}

/// Player record assigned to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerWithTeam {
    /// Fields shared with [`Player`].
    #[serde(flatten)]
    pub player: Player,
    /// Team the player belongs to.
    pub team_id: String,
}

/// `{ "player": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEnvelope<P> {
    /// Wrapped player record.
    pub player: P,
}

impl<P: Serialize> Payload for PlayerEnvelope<P> {}

/// One match slot inside a phase round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSlot {
    /// Home team id.
    pub first_team_id: String,
    /// Match that feeds the home team.
    pub first_team_parent_id: String,
    /// Label shown before the home team is known.
    pub first_team_placeholder: String,
    /// Home team score.
    pub first_team_score: String,
    /// Away team id.
    pub second_team_id: String,
    /// Match that feeds the away team.
    pub second_team_parent_id: String,
    /// Label shown before the away team is known.
    pub second_team_placeholder: String,
    /// Away team score.
    pub second_team_score: String,
}

impl MatchSlot {
    /// Slot filled with fixed placeholder values.
    pub fn placeholder() -> Self {
        Self {
            first_team_id: "some-first-team-id".to_string(),
            first_team_parent_id: "some-first-team-parent-id".to_string(),
            first_team_placeholder: "some-first-team-placeholder".to_string(),
            first_team_score: "some-first-team-score".to_string(),
            second_team_id: "some-second-team-id".to_string(),
            second_team_parent_id: "some-second-team-parent-id".to_string(),
            second_team_placeholder: "some-second-team-placeholder".to_string(),
            second_team_score: "some-second-team-score".to_string(),
        }
    }
}

/// Round record inside a tournament phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Matches played in the round.
    pub matches: Vec<MatchSlot>,
    /// Round title.
    pub title: String,
    /// Owning tournament phase.
    pub tournament_phase_id: String,
}

/// `{ "phase_round": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEnvelope {
    /// Wrapped round record.
    pub phase_round: Round,
}

impl Payload for RoundEnvelope {}

fn random_player(tournament_id: &str) -> Player {
    Player {
        facebook: random_string(),
        instagram: random_string(),
        name: random_string(),
        tournament_id: tournament_id.to_string(),
        twitter: random_string(),
        username: random_string(),
        shirt_name: random_string(),
        shirt_number: DEFAULT_SHIRT_NUMBER,
    }
}

/// Builds a player body for `POST /tournaments/{id}/players`.
pub fn tournament_player_payload(tournament_id: &str) -> PlayerEnvelope<Player> {
    PlayerEnvelope {
        player: random_player(tournament_id),
    }
}

/// Builds a player body that also references `team_id`.
pub fn tournament_player_with_team_payload(
    tournament_id: &str,
    team_id: &str,
) -> PlayerEnvelope<PlayerWithTeam> {
    PlayerEnvelope {
        player: PlayerWithTeam {
            player: random_player(tournament_id),
            team_id: team_id.to_string(),
        },
    }
}

/// Builds a phase round body with one placeholder match.
pub fn tournament_round_payload(tournament_phase_id: &str) -> RoundEnvelope {
    RoundEnvelope {
        phase_round: Round {
            matches: vec![MatchSlot::placeholder()],
            title: random_string(),
            tournament_phase_id: tournament_phase_id.to_string(),
        },
    }
}

/// Payload conversion errors.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// JSON encoding failure.
    #[error("payload codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
