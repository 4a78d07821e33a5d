use arcum_core::error::EnrichError;
use arcum_core::parser::{is_allowed_reason, parse_annotation, ALLOWED_REASONS};

// ── Tests ────────────────────────────────────────────────────────────────────

/// Four well-formed `label: value` lines parse into the four fields in
/// positional order.
#[test]
fn four_lines_parse_positionally() {
    let reply = "Reason_Detailed: Volume fell 40% while support calls tripled\n\
                 Suggest_Detailed: Call the merchant to review pricing\n\
                 Reason: pricing\n\
                 Suggested: call";
    let annotation = parse_annotation(reply).unwrap();
    assert_eq!(
        annotation.reason_detailed,
        "Volume fell 40% while support calls tripled"
    );
    assert_eq!(
        annotation.suggested_detailed,
        "Call the merchant to review pricing"
    );
    assert_eq!(annotation.reason, "pricing");
    assert_eq!(annotation.suggested, "call");
}

/// Label text is discarded, not matched — the contract is purely positional.
#[test]
fn labels_are_discarded() {
    let reply = "alpha: one\nbeta: two\ngamma: three\ndelta: four";
    let annotation = parse_annotation(reply).unwrap();
    assert_eq!(annotation.reason_detailed, "one");
    assert_eq!(annotation.suggested_detailed, "two");
    assert_eq!(annotation.reason, "three");
    assert_eq!(annotation.suggested, "four");
}

/// Blank lines anywhere in the reply are stripped before positions count.
#[test]
fn blank_lines_are_stripped() {
    let reply = "\n\nReason_Detailed: a\n\n   \nSuggest_Detailed: b\nReason: c\n\nSuggested: d\n";
    let annotation = parse_annotation(reply).unwrap();
    assert_eq!(annotation.reason, "c");
    assert_eq!(annotation.suggested, "d");
}

/// Only the first `:` splits a line; colons inside the value survive.
#[test]
fn value_keeps_embedded_colons() {
    let reply = "Reason_Detailed: volume fell: sharply\nS: b\nR: c\nA: d";
    let annotation = parse_annotation(reply).unwrap();
    assert_eq!(annotation.reason_detailed, "volume fell: sharply");
}

/// Lines past the fourth are ignored.
#[test]
fn extra_lines_are_ignored() {
    let reply = "A: 1\nB: 2\nC: 3\nD: 4\nE: 5";
    let annotation = parse_annotation(reply).unwrap();
    assert_eq!(annotation.suggested, "4");
}

/// Fewer than four non-blank lines is a malformed response, reported with
/// the observed line count — not a panic.
#[test]
fn three_lines_is_malformed() {
    let reply = "Reason_Detailed: a\nSuggest_Detailed: b\nReason: pricing";
    match parse_annotation(reply) {
        Err(EnrichError::MalformedResponse { lines }) => assert_eq!(lines, 3),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

/// An empty reply reports zero lines.
#[test]
fn empty_response_is_malformed() {
    match parse_annotation("") {
        Err(EnrichError::MalformedResponse { lines }) => assert_eq!(lines, 0),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

/// A line with no `:` separator is rejected with its position.
#[test]
fn line_without_separator_is_rejected() {
    let reply = "Reason_Detailed missing separator\nB: 2\nC: 3\nD: 4";
    match parse_annotation(reply) {
        Err(EnrichError::UnlabeledLine { index }) => assert_eq!(index, 0),
        other => panic!("expected UnlabeledLine, got {other:?}"),
    }
}

/// All eight taxonomy categories pass the advisory check.
#[test]
fn taxonomy_accepts_all_eight_categories() {
    for reason in ALLOWED_REASONS {
        assert!(is_allowed_reason(reason), "'{reason}' should be allowed");
    }
}

/// Out-of-set values — including suggested-action strings — fail the
/// advisory check. The caller still writes them unchanged.
#[test]
fn taxonomy_rejects_out_of_set_values() {
    for reason in ["unknown-category", "chargeback mitigation", "Pricing", ""] {
        assert!(!is_allowed_reason(reason), "'{reason}' should not be allowed");
    }
}
