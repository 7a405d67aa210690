#![deny(clippy::all, clippy::perf, clippy::suspicious)]

//! Diagnostic oracle for an annotation checker's conformance test suite.
//!
//! The checker emits one machine-readable line per diagnostic; test sources
//! declare expectations in `test:` comments. This crate parses both sides
//! into typed values and decides which expectations the emitted diagnostics
//! satisfy. It performs no I/O of its own: the surrounding harness discovers
//! files, invokes the checker, and feeds the raw text in.

pub mod assertion;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod record;
pub mod report;

pub use assertion::{AssertionKind, TestAssertion};
pub use error::{Error, Result};
pub use record::{ConversionKey, DiagnosticRecord, Offsets, RecordKind};
pub use report::{AssertionOutcome, AssertionStatus, ConformanceReport, evaluate};
