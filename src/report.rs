//! Per-file evaluation of assertions against emitted diagnostics.

use std::path::PathBuf;

use serde::Serialize;

use crate::assertion::TestAssertion;
use crate::record::DiagnosticRecord;

pub const JSON_SCHEMA_VERSION: &str = "1.0.0";

/// Outcome of one assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssertionStatus {
    Satisfied,
    Unsatisfied,
}

impl AssertionStatus {
    #[must_use]
    pub fn is_satisfied(self) -> bool {
        matches!(self, AssertionStatus::Satisfied)
    }
}

/// One assertion together with its evaluation result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssertionOutcome {
    pub file: PathBuf,
    pub line: u32,
    pub text: String,
    pub status: AssertionStatus,
}

/// Evaluation results for one test file.
#[derive(Clone, Debug, Serialize)]
pub struct ConformanceReport {
    version: String,
    outcomes: Vec<AssertionOutcome>,
}

/// Evaluate every assertion against the diagnostics emitted for the same
/// file. An assertion is satisfied when at least one record matches it;
/// the ordering of either slice is immaterial to the result.
#[must_use]
pub fn evaluate(
    assertions: &[TestAssertion],
    records: &[DiagnosticRecord],
) -> ConformanceReport {
    let outcomes = assertions
        .iter()
        .map(|assertion| {
            let satisfied = records.iter().any(|record| assertion.matches(record));
            AssertionOutcome {
                file: assertion.file().to_path_buf(),
                line: assertion.line(),
                text: assertion.text().to_string(),
                status: if satisfied {
                    AssertionStatus::Satisfied
                } else {
                    AssertionStatus::Unsatisfied
                },
            }
        })
        .collect();
    ConformanceReport {
        version: JSON_SCHEMA_VERSION.to_string(),
        outcomes,
    }
}

impl ConformanceReport {
    #[must_use]
    pub fn outcomes(&self) -> &[AssertionOutcome] {
        &self.outcomes
    }

    /// Whether every assertion was satisfied.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| outcome.status.is_satisfied())
    }

    /// Assertions no emitted diagnostic matched.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.status.is_satisfied())
    }

    /// Render the report as a single JSON object.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".into())
    }
}
