//! End-to-end oracle flow: checker output and test comments in, assertion
//! verdicts out. The harness that normally sits around this crate is
//! simulated by plain slices.

use conformance_oracle::{evaluate, DiagnosticRecord, Error, TestAssertion};

fn parse_output(lines: &[&str]) -> Vec<DiagnosticRecord> {
    lines
        .iter()
        .filter_map(|line| DiagnosticRecord::parse(line).expect("emitted output is well formed"))
        .collect()
}

fn parse_comments(file: &str, comments: &[(u32, &str)]) -> Vec<TestAssertion> {
    comments
        .iter()
        .filter_map(|(line, text)| {
            TestAssertion::parse(file, *line, text).expect("test corpus is well formed")
        })
        .collect()
}

#[test]
fn satisfied_run_passes() {
    let records = parse_output(&[
        "Running checker on Case.java",
        "Case.java:14: error: (assignment) $$ 2 $$ @Tainted String $$ @Untainted String $$ ( 13, 20 ) $$ incompatible types in assignment.",
        "Case.java:21: error: (bound) $$ 0 $$ $$ annotation has no effect here",
        "2 errors",
    ]);
    assert_eq!(records.len(), 2, "plain lines are skipped, not errors");

    let assertions = parse_comments(
        "Case.java",
        &[
            (14, "test:cannot-convert:@Tainted String to @Untainted String"),
            (21, "test:irrelevant_annotation"),
            (30, "/** explanatory prose, not an assertion */"),
        ],
    );
    assert_eq!(assertions.len(), 2);

    let report = evaluate(&assertions, &records);
    assert!(report.passed(), "{}", report.to_json());
}

#[test]
fn unmatched_assertion_is_reported() {
    let records = parse_output(&[
        "Case.java:14: error: (assignment) $$ 2 $$ int $$ long $$ $$ incompatible types in assignment.",
    ]);
    let assertions = parse_comments(
        "Case.java",
        &[(14, "test:cannot-convert:String to int")],
    );

    let report = evaluate(&assertions, &records);
    assert!(!report.passed());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].text, "test:cannot-convert:String to int");
    assert_eq!(failures[0].line, 14);
}

#[test]
fn capture_ids_do_not_break_matching_across_runs() {
    // The inference engine numbers capture variables differently run to run;
    // both runs must satisfy the same assertion.
    let first_run = parse_output(&[
        "Case.java:5: error: (assignment) $$ 2 $$ List<capture#101 of ?> $$ List<String> $$ $$ incompatible types",
    ]);
    let second_run = parse_output(&[
        "Case.java:5: error: (assignment) $$ 2 $$ List<capture#7 of ?> $$ List<String> $$ $$ incompatible types",
    ]);
    let assertions = parse_comments(
        "Case.java",
        &[(5, "test:cannot-convert:List<capture of ?> to List<String>")],
    );

    assert!(evaluate(&assertions, &first_run).passed());
    assert!(evaluate(&assertions, &second_run).passed());
}

#[test]
fn authoring_defects_abort_instead_of_passing() {
    let unknown = TestAssertion::parse("Case.java", 3, "test:expression-type:int")
        .expect_err("unknown kinds are fatal");
    assert!(matches!(unknown, Error::UnknownAssertionKind { .. }));

    let short = DiagnosticRecord::parse(
        "Case.java:3: error: (return) $$ 2 $$ String $$ int $$ $$ incompatible return",
    )
    .expect_err("short conversion argument lists are fatal");
    assert!(matches!(short, Error::MissingConversionArgument { .. }));
}
