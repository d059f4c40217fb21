//! Ordered collection of independent contract cases.

use champs_e2e_schema::SchemaRegistry;

use crate::contract::{ContractCase, ContractFailure};
use crate::transport::HttpTransport;

/// Cases executed one after another; a failure never stops later cases.
#[derive(Debug, Clone, Default)]
pub struct ContractSuite {
    cases: Vec<ContractCase>,
}

impl ContractSuite {
    /// Creates an empty suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a case.
    pub fn with_case(mut self, case: ContractCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Appends a case in place.
    pub fn push(&mut self, case: ContractCase) {
        self.cases.push(case);
    }

    /// Registered cases in run order.
    pub fn cases(&self) -> &[ContractCase] {
        &self.cases
    }

    /// Runs every case and collects the outcomes.
    pub async fn run<T>(&self, transport: &T, registry: &SchemaRegistry) -> SuiteReport
    where
        T: HttpTransport + ?Sized,
    {
        let mut reports = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let outcome = case
                .run(transport, registry)
                .await
                .map(|response| response.status);
            reports.push(CaseReport {
                name: case.name().to_string(),
                outcome,
            });
        }

        let report = SuiteReport { cases: reports };
        tracing::info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            "contract suite finished"
        );
        report
    }
}

/// Outcome of one case.
#[derive(Debug)]
pub struct CaseReport {
    /// Scenario name.
    pub name: String,
    /// Response status on pass, failure otherwise.
    pub outcome: Result<u16, ContractFailure>,
}

impl CaseReport {
    /// Returns `true` when the case passed.
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Aggregated suite outcome.
#[derive(Debug, Default)]
pub struct SuiteReport {
    cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// Per-case outcomes in run order.
    pub fn cases(&self) -> &[CaseReport] {
        &self.cases
    }

    /// Number of passing cases.
    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|case| case.passed()).count()
    }

    /// Number of failing cases.
    pub fn failed_count(&self) -> usize {
        self.cases.len() - self.passed_count()
    }

    /// Returns `true` when every case passed. An empty suite passes.
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }

    /// Failures in run order.
    pub fn failures(&self) -> impl Iterator<Item = &ContractFailure> {
        self.cases
            .iter()
            .filter_map(|case| case.outcome.as_ref().err())
    }
}
