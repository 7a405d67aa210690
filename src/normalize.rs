//! Canonicalization of checker-rendered type spellings.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

// The inference engine numbers capture variables per run, so two otherwise
// identical runs render `capture#621 of ?` and `capture#17 of ?` for the same
// type.
static CAPTURE_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcapture#\d+ of \?").expect("capture variable regex"));

/// Rewrite run-dependent capture-variable ids to the stable `capture of ?`
/// spelling. Case, whitespace, and generic-argument structure are preserved
/// verbatim; the function is total and idempotent.
#[must_use]
pub fn normalize_type(spelling: &str) -> Cow<'_, str> {
    CAPTURE_VARIABLE.replace_all(spelling, "capture of ?")
}
