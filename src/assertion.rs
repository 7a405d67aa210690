//! Parsing of conformance assertions declared in test sources.
//!
//! The harness scans test files for comments; the trimmed text of each
//! comment is offered to [`TestAssertion::parse`]. Assertions look like
//! `test:<kind>` or `test:<kind>:<arguments>`:
//!
//! ```text
//! test:cannot-convert:String to @Untainted String
//! test:irrelevant_annotation
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static ASSERTION_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^test:(?P<kind>[^:]+)(?::(?P<arguments>.*))?$").expect("assertion regex")
});

/// Separator between the source and sink patterns of a `cannot-convert`
/// argument.
const TYPE_SEPARATOR: &str = " to ";

/// The shape of one expectation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssertionKind {
    /// `test:cannot-convert:<source> to <sink>` — expects a conversion
    /// diagnostic whose normalized source and sink types equal these
    /// spellings exactly.
    CannotConvert {
        source_type: String,
        sink_type: String,
    },
    /// `test:irrelevant_annotation` — expects some diagnostic showing the
    /// checker objected to an annotation in a position where it has no
    /// effect.
    IrrelevantAnnotation,
}

/// One expectation declared alongside test source. Immutable once
/// constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestAssertion {
    file: PathBuf,
    line: u32,
    text: String,
    kind: AssertionKind,
}

impl TestAssertion {
    /// Parse the text of one comment found at `file:line`.
    ///
    /// Returns `Ok(None)` when the comment is not an assertion at all. A
    /// comment that does declare an assertion but names an unknown kind, or
    /// supplies malformed `cannot-convert` arguments, is an authoring error:
    /// the corpus is internally inconsistent and processing must stop rather
    /// than silently pass.
    pub fn parse(file: impl Into<PathBuf>, line: u32, raw: &str) -> Result<Option<Self>> {
        let text = raw.trim();
        let Some(captures) = ASSERTION_TEXT.captures(text) else {
            return Ok(None);
        };
        let file = file.into();
        let arguments = captures.name("arguments").map(|m| m.as_str());

        let kind = match &captures["kind"] {
            "cannot-convert" => parse_cannot_convert(arguments, &file, line, text)?,
            "irrelevant_annotation" | "irrelevant-annotation" => {
                if let Some(arguments) = arguments {
                    tracing::warn!(
                        file = %file.display(),
                        line,
                        arguments,
                        "irrelevant_annotation takes no arguments; ignoring them"
                    );
                }
                AssertionKind::IrrelevantAnnotation
            }
            _ => {
                return Err(Error::UnknownAssertionKind {
                    file,
                    line,
                    text: text.to_string(),
                });
            }
        };

        Ok(Some(Self {
            file,
            line,
            text: text.to_string(),
            kind,
        }))
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// 1-based line the assertion comment was found on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The trimmed declaration text, as authored.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> &AssertionKind {
        &self.kind
    }
}

impl fmt::Display for TestAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.text)
    }
}

// The split point is the rightmost ` to `: the source pattern absorbs
// everything before it. A sink spelling that itself contains ` to ` cannot
// be expressed; that limitation is part of the assertion grammar.
fn parse_cannot_convert(
    arguments: Option<&str>,
    file: &Path,
    line: u32,
    text: &str,
) -> Result<AssertionKind> {
    let malformed = || Error::MalformedCannotConvert {
        file: file.to_path_buf(),
        line,
        text: text.to_string(),
    };
    let arguments = arguments.ok_or_else(malformed)?;
    let split = arguments.rfind(TYPE_SEPARATOR).ok_or_else(malformed)?;
    Ok(AssertionKind::CannotConvert {
        source_type: arguments[..split].to_string(),
        sink_type: arguments[split + TYPE_SEPARATOR.len()..].to_string(),
    })
}
