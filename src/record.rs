//! Parsing of machine-readable diagnostic lines emitted by the checker.
//!
//! Each diagnostic arrives as a single logical line (the trailing message may
//! embed literal newlines):
//!
//! ```text
//! <file>:<line>: error: (<key>) $$ <argCount> $$ <arg_1> $$ ... $$ <arg_argCount> $$ <offsets> $$ <message>
//! ```
//!
//! The positional-argument layout depends on the message key; conversion keys
//! carry the source and sink type spellings at fixed positions.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::normalize::normalize_type;

/// Token separating wire-format segments.
const DELIMITER: &str = "$$";

// Structural pass: everything after the argument count is captured as one
// blob and split separately, because the message itself may contain newlines
// and delimiter lookalikes.
static DETAIL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^(?P<file>\S+):(?P<line>\d+): error: \((?P<key>[^)]+)\) \$\$ (?P<count>\d+) \$\$ (?P<rest>.*)$",
    )
    .expect("detail line regex")
});

static OFFSETS_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\( (?P<start>-?\d+), (?P<end>-?\d+) \))?$").expect("offsets regex")
});

/// Character offsets reported alongside a diagnostic.
///
/// Parsed but not consulted by matching; kept first-class so
/// position-sensitive assertions can be added without touching the wire
/// format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Offsets {
    pub start: i64,
    pub end: i64,
}

/// Message keys whose diagnostics describe a type flowing from a source
/// expression into a sink context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionKey {
    Assignment,
    Return,
    Argument,
    TypeArgument,
}

impl ConversionKey {
    #[must_use]
    pub fn from_message_key(key: &str) -> Option<Self> {
        match key {
            "assignment" => Some(Self::Assignment),
            "return" => Some(Self::Return),
            "argument" => Some(Self::Argument),
            "type-argument" => Some(Self::TypeArgument),
            _ => None,
        }
    }

    /// Positions of the source and sink type spellings in the positional
    /// argument list. The layout is fixed per key by the emitting tool.
    #[must_use]
    pub fn type_indices(self) -> (usize, usize) {
        match self {
            ConversionKey::Assignment => (0, 1),
            ConversionKey::Return => (1, 2),
            ConversionKey::Argument | ConversionKey::TypeArgument => (2, 3),
        }
    }
}

/// Payload distinguishing conversion diagnostics from everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Generic,
    /// Type spellings are stored exactly as emitted; the record's accessors
    /// normalize on read.
    Conversion {
        source_type: String,
        sink_type: String,
    },
}

/// One reported issue, parsed from a checker output line. Immutable once
/// constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticRecord {
    file: PathBuf,
    line: u32,
    message_key: String,
    message: String,
    offsets: Option<Offsets>,
    kind: RecordKind,
}

impl DiagnosticRecord {
    /// Parse one checker output line.
    ///
    /// Returns `Ok(None)` for lines that are not in the wire format at all:
    /// those are ordinary human-readable output, not errors. A line that
    /// structurally matches but contradicts its own declared shape (missing
    /// segments, short conversion argument list, garbage offsets) is a defect
    /// in the emitting tool and fails.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let Some(captures) = DETAIL_LINE.captures(input) else {
            return Ok(None);
        };

        let line = parse_number(&captures["line"], "line number", input)?;
        let count: usize = parse_number(&captures["count"], "argument count", input)?;
        let message_key = captures["key"].to_string();

        // count arguments, plus the offsets segment and the message.
        let segments = count.checked_add(2).ok_or_else(|| Error::InvalidNumber {
            input: input.to_string(),
            field: "argument count",
        })?;
        let pieces = split_detail_blob(&captures["rest"], segments);
        if pieces.len() < segments {
            return Err(Error::TruncatedDiagnostic {
                input: input.to_string(),
                expected: segments,
                found: pieces.len(),
            });
        }

        let offsets = parse_offsets(&pieces[count], input)?;
        let message = pieces[count + 1].clone();

        let kind = match ConversionKey::from_message_key(&message_key) {
            Some(key) => {
                let (source_index, sink_index) = key.type_indices();
                if sink_index >= count {
                    return Err(Error::MissingConversionArgument {
                        input: input.to_string(),
                        key: message_key,
                        needed: sink_index + 1,
                        count,
                    });
                }
                RecordKind::Conversion {
                    source_type: pieces[source_index].clone(),
                    sink_type: pieces[sink_index].clone(),
                }
            }
            None => RecordKind::Generic,
        };

        let record = Self {
            file: PathBuf::from(&captures["file"]),
            line,
            message_key,
            message,
            offsets,
            kind,
        };
        tracing::debug!(
            file = %record.file.display(),
            line = record.line,
            key = %record.message_key,
            "parsed detail diagnostic"
        );
        Ok(Some(record))
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// 1-based line the checker reported the diagnostic on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn offsets(&self) -> Option<Offsets> {
        self.offsets
    }

    #[must_use]
    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    #[must_use]
    pub fn is_conversion(&self) -> bool {
        matches!(self.kind, RecordKind::Conversion { .. })
    }

    /// Normalized source-type spelling, for conversion records.
    #[must_use]
    pub fn source_type(&self) -> Option<Cow<'_, str>> {
        match &self.kind {
            RecordKind::Conversion { source_type, .. } => Some(normalize_type(source_type)),
            RecordKind::Generic => None,
        }
    }

    /// Normalized sink-type spelling, for conversion records.
    #[must_use]
    pub fn sink_type(&self) -> Option<Cow<'_, str>> {
        match &self.kind {
            RecordKind::Conversion { sink_type, .. } => Some(normalize_type(sink_type)),
            RecordKind::Generic => None,
        }
    }
}

impl fmt::Display for DiagnosticRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: ({}) {}",
            self.file.display(),
            self.line,
            self.message_key,
            self.message
        )
    }
}

/// Split the text after the argument count into at most `limit` trimmed
/// pieces: the positional arguments, the offsets segment, the message. The
/// message is the remainder verbatim; a `$$` inside it is not a delimiter.
fn split_detail_blob(blob: &str, limit: usize) -> Vec<String> {
    blob.splitn(limit, DELIMITER)
        .map(|piece| piece.trim().to_string())
        .collect()
}

fn parse_offsets(segment: &str, input: &str) -> Result<Option<Offsets>> {
    let Some(captures) = OFFSETS_SEGMENT.captures(segment) else {
        return Err(Error::UnparseableOffsets {
            input: input.to_string(),
            segment: segment.to_string(),
        });
    };
    match (captures.name("start"), captures.name("end")) {
        (Some(start), Some(end)) => Ok(Some(Offsets {
            start: parse_number(start.as_str(), "offset start", input)?,
            end: parse_number(end.as_str(), "offset end", input)?,
        })),
        _ => Ok(None),
    }
}

fn parse_number<T: FromStr>(digits: &str, field: &'static str, input: &str) -> Result<T> {
    digits.parse().map_err(|_| Error::InvalidNumber {
        input: input.to_string(),
        field,
    })
}
