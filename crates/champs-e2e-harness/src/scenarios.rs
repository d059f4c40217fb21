//! Scenarios for the tournament API.

use champs_e2e_payloads::{Payload, tournament_player_payload};
use champs_e2e_schema::SchemaRegistry;
use champs_e2e_urls::ApiUrls;

use crate::contract::{ContractCase, ContractFailure};
use crate::suite::ContractSuite;
use crate::transport::{ApiRequest, HttpTransport};

/// Sport id exercised by the live suite.
pub const SPORT_BASKETBALL_5X5: &str = "basketball_5x5";

/// Status returned when a resource is created.
pub const CREATED_STATUS: u16 = 201;

const CREATE_PLAYER_CASE: &str = "Players POST /tournaments/:id/players";

/// `GET /sports/{sport_id}` must return 200 and a `SportResponse`.
pub fn sport_contract_case(urls: &ApiUrls, sport_id: &str) -> ContractCase {
    ContractCase::new(
        "Sports GET /:id matches schema",
        ApiRequest::get(urls.sport(sport_id)),
        "SportResponse",
    )
}

/// `GET /tournaments/{tournament_id}/players/{player_id}` must return 200
/// and a `PlayerResponse`.
pub fn player_contract_case(urls: &ApiUrls, tournament_id: &str, player_id: &str) -> ContractCase {
    ContractCase::new(
        "Players GET /tournaments/:id/players/:id matches schema",
        ApiRequest::get(urls.tournament_player(tournament_id, player_id)),
        "PlayerResponse",
    )
}

/// Cases that need no pre-existing data besides the seeded sports.
pub fn live_suite(urls: &ApiUrls) -> ContractSuite {
    ContractSuite::new().with_case(sport_contract_case(urls, SPORT_BASKETBALL_5X5))
}

/// Creates a random player under `tournament_id`, fetches it back, and
/// checks that `tournament_id` survived unchanged.
///
/// Returns the id of the created player.
///
/// # Errors
/// Any [`ContractFailure`] from either call, [`ContractFailure::MissingField`]
/// when a response lacks `player.id` or `player.tournament_id`, and
/// [`ContractFailure::ReferenceMismatch`] when the fetched tournament differs.
pub async fn player_round_trip<T>(
    transport: &T,
    registry: &SchemaRegistry,
    urls: &ApiUrls,
    tournament_id: &str,
) -> Result<String, ContractFailure>
where
    T: HttpTransport + ?Sized,
{
    let body = tournament_player_payload(tournament_id)
        .to_json()
        .map_err(|source| ContractFailure::Payload {
            case: CREATE_PLAYER_CASE.to_string(),
            source,
        })?;

    let create = ContractCase::new(
        CREATE_PLAYER_CASE,
        ApiRequest::post(urls.tournament_players(tournament_id), body),
        "PlayerResponse",
    )
    .expect_status(CREATED_STATUS);
    let created = create.run(transport, registry).await?;
    let player_id = string_at(&created.body, "/player/id", create.name())?;

    let fetch = player_contract_case(urls, tournament_id, &player_id);
    let fetched = fetch.run(transport, registry).await?;
    let stored_tournament = string_at(&fetched.body, "/player/tournament_id", fetch.name())?;

    if stored_tournament != tournament_id {
        return Err(ContractFailure::ReferenceMismatch {
            case: fetch.name().to_string(),
            field: "tournament_id".to_string(),
            expected: tournament_id.to_string(),
            actual: stored_tournament,
        });
    }

    tracing::info!(player_id = %player_id, tournament_id, "player round trip passed");
    Ok(player_id)
}

fn string_at(body: &serde_json::Value, pointer: &str, case: &str) -> Result<String, ContractFailure> {
    body.pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ContractFailure::MissingField {
            case: case.to_string(),
            pointer: pointer.to_string(),
        })
}
