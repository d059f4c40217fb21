//! Tests envelope keys, field policies, and reference propagation.

use std::collections::BTreeSet;

use champs_e2e_payloads::{
    DEFAULT_SHIRT_NUMBER, Payload, tournament_player_payload,
    tournament_player_with_team_payload, tournament_round_payload,
};
use serde_json::Value;

const PLAYER_TEXT_FIELDS: [&str; 6] = [
    "facebook",
    "instagram",
    "name",
    "twitter",
    "username",
    "shirt_name",
];

fn keys(value: &Value) -> BTreeSet<&str> {
    value
        .as_object()
        .expect("value should be a json object")
        .keys()
        .map(String::as_str)
        .collect()
}

fn assert_free_text_nonempty(record: &Value, fields: &[&str]) {
    for field in fields {
        let text = record[*field]
            .as_str()
            .unwrap_or_else(|| panic!("{field} should be a string"));
        assert!(!text.is_empty(), "{field} should be nonempty");
    }
}

#[test]
fn payload_shape_tests_player_has_documented_keys() {
    let body = tournament_player_payload("tournament-42")
        .to_json()
        .expect("player payload should serialize");

    assert_eq!(keys(&body), BTreeSet::from(["player"]));
    let player = &body["player"];
    assert_eq!(
        keys(player),
        BTreeSet::from([
            "facebook",
            "instagram",
            "name",
            "tournament_id",
            "twitter",
            "username",
            "shirt_name",
            "shirt_number",
        ])
    );
    assert_free_text_nonempty(player, &PLAYER_TEXT_FIELDS);
    assert_eq!(player["tournament_id"], "tournament-42");
    assert_eq!(player["shirt_number"], DEFAULT_SHIRT_NUMBER);
}

#[test]
fn payload_shape_tests_player_with_team_adds_team_id() {
    let body = tournament_player_with_team_payload("tournament-42", "team-7")
        .to_json()
        .expect("player payload should serialize");

    let player = &body["player"];
    assert_eq!(
        keys(player),
        BTreeSet::from([
            "facebook",
            "instagram",
            "name",
            "team_id",
            "tournament_id",
            "twitter",
            "username",
            "shirt_name",
            "shirt_number",
        ])
    );
    assert_free_text_nonempty(player, &PLAYER_TEXT_FIELDS);
    assert_eq!(player["tournament_id"], "tournament-42");
    assert_eq!(player["team_id"], "team-7");
}

#[test]
fn payload_shape_tests_round_wraps_phase_round() {
    let body = tournament_round_payload("phase-3")
        .to_json()
        .expect("round payload should serialize");

    assert_eq!(keys(&body), BTreeSet::from(["phase_round"]));
    let round = &body["phase_round"];
    assert_eq!(
        keys(round),
        BTreeSet::from(["matches", "title", "tournament_phase_id"])
    );
    assert_free_text_nonempty(round, &["title"]);
    assert_eq!(round["tournament_phase_id"], "phase-3");

    let matches = round["matches"].as_array().expect("matches should be an array");
    assert_eq!(matches.len(), 1);
    assert_eq!(keys(&matches[0]).len(), 8);
    assert_eq!(matches[0]["first_team_id"], "some-first-team-id");
    assert_eq!(matches[0]["second_team_score"], "some-second-team-score");
}

#[test]
fn payload_shape_tests_reference_ids_copied_verbatim() {
    let odd_id = " id with spaces/and?symbols ";
    let player = tournament_player_with_team_payload(odd_id, odd_id);
    assert_eq!(player.player.player.tournament_id, odd_id);
    assert_eq!(player.player.team_id, odd_id);

    let round = tournament_round_payload("");
    assert_eq!(round.phase_round.tournament_phase_id, "");
}
