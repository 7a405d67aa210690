use std::fmt;
use std::path::PathBuf;

/// Unified error type for the oracle.
///
/// Every variant is a fatal authoring defect: either the test corpus declares
/// an expectation the oracle cannot evaluate, or the emitting tool produced a
/// diagnostic line that contradicts its own declared shape. Ordinary
/// non-diagnostic output and non-assertion comments are not errors; the
/// parsers report those as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A diagnostic line declared more `$$`-delimited segments than its body
    /// supplied.
    TruncatedDiagnostic {
        input: String,
        expected: usize,
        found: usize,
    },
    /// A conversion-keyed diagnostic without enough positional arguments for
    /// the key's fixed source/sink positions.
    MissingConversionArgument {
        input: String,
        key: String,
        needed: usize,
        count: usize,
    },
    /// The offsets segment was neither empty nor `( start, end )`.
    UnparseableOffsets { input: String, segment: String },
    /// A numeric field of a diagnostic line does not fit its type.
    InvalidNumber {
        input: String,
        field: &'static str,
    },
    /// An assertion comment named a kind the oracle does not evaluate.
    UnknownAssertionKind {
        file: PathBuf,
        line: u32,
        text: String,
    },
    /// A `cannot-convert` assertion without a `<source> to <sink>` argument.
    MalformedCannotConvert {
        file: PathBuf,
        line: u32,
        text: String,
    },
}

/// Convenience result alias used across the oracle.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedDiagnostic {
                input,
                expected,
                found,
            } => write!(
                f,
                "diagnostic declares {expected} segments but supplies {found}: {input}"
            ),
            Error::MissingConversionArgument {
                input,
                key,
                needed,
                count,
            } => write!(
                f,
                "({key}) diagnostic needs {needed} arguments for its type pair but carries {count}: {input}"
            ),
            Error::UnparseableOffsets { input, segment } => {
                write!(f, "unparseable offsets segment `{segment}`: {input}")
            }
            Error::InvalidNumber { input, field } => {
                write!(f, "{field} out of range: {input}")
            }
            Error::UnknownAssertionKind { file, line, text } => write!(
                f,
                "unknown conformance assertion kind in {}:{line}: {text}",
                file.display()
            ),
            Error::MalformedCannotConvert { file, line, text } => write!(
                f,
                "bad cannot-convert assertion in {}:{line}: {text}",
                file.display()
            ),
        }
    }
}

impl std::error::Error for Error {}
