#![warn(missing_docs)]
//! # champs-e2e binary
//!
//! Runs the live contract suite against `CHAMPS_API_HOST` and exits non-zero
//! when any scenario fails.

use std::process::ExitCode;

use champs_e2e_harness::{
    HarnessConfig, harness_version, init_tracing, live_suite, player_round_trip,
};
use champs_e2e_schema::SchemaRegistry;

/// CLI entry point.
#[tokio::main]
async fn main() -> ExitCode {
    if std::env::args().skip(1).any(|arg| arg == "--version") {
        println!("champs-e2e {}", harness_version());
        return ExitCode::SUCCESS;
    }

    let config = match HarnessConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.log_filter);
    tracing::info!(host = %config.api_host, schema = %config.schema_path.display(), "starting contract run");

    let registry = match SchemaRegistry::from_path(&config.schema_path) {
        Ok(registry) => registry,
        Err(error) => {
            eprintln!("schema load failed: {error}");
            return ExitCode::from(2);
        }
    };
    let transport = match config.transport() {
        Ok(transport) => transport,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(2);
        }
    };
    let urls = config.urls();

    let report = live_suite(&urls).run(&transport, &registry).await;
    for case in report.cases() {
        match &case.outcome {
            Ok(status) => println!("PASS {} ({status})", case.name),
            Err(failure) => println!("FAIL {failure}"),
        }
    }
    let mut all_passed = report.all_passed();

    match &config.tournament_id {
        Some(tournament_id) => {
            match player_round_trip(&transport, &registry, &urls, tournament_id).await {
                Ok(player_id) => println!("PASS player round trip (player {player_id})"),
                Err(failure) => {
                    println!("FAIL {failure}");
                    all_passed = false;
                }
            }
        }
        None => println!("SKIP player round trip (CHAMPS_TOURNAMENT_ID unset)"),
    }

    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
