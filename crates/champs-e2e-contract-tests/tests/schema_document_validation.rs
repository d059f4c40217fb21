//! Validates the shipped schema document and its fixtures.

mod support;

#[test]
fn shipped_document_defines_every_referenced_fragment() {
    let registry = support::registry();

    for name in [
        "Sport",
        "PlayerStatistic",
        "SportResponse",
        "Player",
        "PlayerResponse",
    ] {
        assert!(registry.definition(name).is_some(), "{name} should be defined");
        registry
            .compile(name)
            .unwrap_or_else(|error| panic!("{name} should compile: {error}"));
    }
}

#[test]
fn sport_fixture_matches_schema() {
    let registry = support::registry();
    registry
        .validate("SportResponse", &support::fixture("sport-response.valid.json"))
        .expect("sport fixture should validate against schema");
}

#[test]
fn player_fixture_matches_schema() {
    let registry = support::registry();
    registry
        .validate(
            "PlayerResponse",
            &support::fixture("player-response.valid.json"),
        )
        .expect("player fixture should validate against schema");
}

#[test]
fn nested_statistic_violation_is_caught_through_refs() {
    let registry = support::registry();
    let mut body = support::fixture("sport-response.valid.json");
    body["sport"]["player_statistics"][0]["value_type"] = serde_json::json!("points");

    assert!(registry.validate("SportResponse", &body).is_err());
}
