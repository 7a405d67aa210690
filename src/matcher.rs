//! Deciding whether an emitted diagnostic satisfies an assertion.

use crate::assertion::{AssertionKind, TestAssertion};
use crate::record::{DiagnosticRecord, RecordKind};

/// Message keys accepted as evidence that the checker rejected an annotation
/// written in a position where it is irrelevant. Any one of these on the
/// offending declaration is the closest diagnosable proxy; location and type
/// spellings do not participate.
pub const IRRELEVANT_ANNOTATION_KEYS: [&str; 7] = [
    "bound",
    "enum-constant-annotated",
    "local-variable-annotated",
    "outer-annotated",
    "primitive-annotated",
    "type-parameter-annotated",
    "wildcard-annotated",
];

impl TestAssertion {
    /// Whether `record` satisfies this assertion.
    ///
    /// Pure predicate over the closed set of assertion/record combinations;
    /// the outcome depends only on the two values, so callers may evaluate
    /// pairs in any order and from any thread.
    #[must_use]
    pub fn matches(&self, record: &DiagnosticRecord) -> bool {
        match (self.kind(), record.kind()) {
            (
                AssertionKind::CannotConvert {
                    source_type,
                    sink_type,
                },
                RecordKind::Conversion { .. },
            ) => {
                record.source_type().is_some_and(|found| found == source_type.as_str())
                    && record.sink_type().is_some_and(|found| found == sink_type.as_str())
            }
            // A generic diagnostic never satisfies a conversion expectation,
            // whatever its message text says.
            (AssertionKind::CannotConvert { .. }, RecordKind::Generic) => false,
            (AssertionKind::IrrelevantAnnotation, _) => {
                IRRELEVANT_ANNOTATION_KEYS.contains(&record.message_key())
            }
        }
    }
}
