#![warn(missing_docs)]
//! # champs-e2e-harness
//!
//! ## Purpose
//! Runs contract scenarios against the tournament API: one HTTP call, one
//! status assertion, one schema assertion per scenario.
//!
//! ## Responsibilities
//! - Define the injectable [`HttpTransport`] seam and its reqwest-backed
//!   implementation.
//! - Model a scenario as a [`ContractCase`] and report failures as
//!   [`ContractFailure`].
//! - Run independent scenarios as a [`ContractSuite`].
//! - Load [`HarnessConfig`] from the environment and install tracing.
//!
//! ## Data flow
//! [`HarnessConfig`] -> `ApiUrls` + `SchemaRegistry` + transport ->
//! [`ContractCase::run`] -> pass (response) or [`ContractFailure`].
//!
//! ## Ownership and lifetimes
//! Cases own their request; the transport and registry are borrowed for the
//! duration of a run and shared across cases.
//!
//! ## Error model
//! Transport failures, status mismatches, and schema violations are terminal
//! for the scenario that hit them. Nothing is retried.
//!
//! ## Security and privacy notes
//! The bearer token is marked sensitive on the wire and redacted from
//! `Debug` output and logs.

pub mod client;
pub mod config;
pub mod contract;
pub mod logging;
pub mod scenarios;
pub mod suite;
pub mod transport;

pub use client::ResourceClient;
pub use config::{ConfigError, HarnessConfig};
pub use contract::{ContractCase, ContractFailure};
pub use logging::init_tracing;
pub use scenarios::{
    SPORT_BASKETBALL_5X5, live_suite, player_contract_case, player_round_trip,
    sport_contract_case,
};
pub use suite::{CaseReport, ContractSuite, SuiteReport};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport, TransportError,
};

/// Returns the harness crate version.
pub fn harness_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
