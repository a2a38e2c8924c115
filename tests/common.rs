#![allow(dead_code)]
//! Shared helpers for `search-dsl` integration tests.

use search_dsl::*;

/// The field set the dashboard falls back to when the field-metadata
/// endpoint has nothing better to offer.
pub fn catalog() -> FieldCatalog {
    FieldCatalog::new(
        [
            "type",
            "version",
            "data.severity",
            "data.cve",
            "data.package_name",
            "data.score",
        ],
        ["data.score"],
    )
}

pub fn parse(input: &str) -> Parsed {
    parse_criteria(input, &catalog())
}

pub fn parse_with(input: &str, allowed: &[&str], ranges: &[&str]) -> Parsed {
    parse_criteria(
        input,
        &FieldCatalog::new(allowed.iter().copied(), ranges.iter().copied()),
    )
}

/// Parses and asserts no errors were produced.
pub fn parse_clean(input: &str) -> Vec<Criterion> {
    let parsed = parse(input);
    assert!(parsed.errors.is_empty(), "unexpected errors: {:?}", parsed.errors);
    parsed.criteria
}

pub fn error_is(issue: &ParseIssue, code: IssueCode, field: &str) {
    assert_eq!(issue.code, code);
    assert_eq!(issue.field, field);
}

pub fn scope_is(criterion: &Criterion, expected: &str, expected_mode: Mode) {
    match criterion {
        Criterion::Scope { value, mode } => {
            assert_eq!(value, expected);
            assert_eq!(*mode, expected_mode);
        }
        other => panic!("expected Scope, got: {other:?}"),
    }
}

pub fn fulltext_is(criterion: &Criterion, expected: &str, expected_mode: Mode) {
    match criterion {
        Criterion::Fulltext { value, mode } => {
            assert_eq!(value, expected);
            assert_eq!(*mode, expected_mode);
        }
        other => panic!("expected Fulltext, got: {other:?}"),
    }
}

pub fn attribute_op<'c>(criterion: &'c Criterion, expected_attr: &str) -> (&'c AttributeOp, Mode) {
    match criterion {
        Criterion::Attribute { attr, op, mode } => {
            assert_eq!(attr, expected_attr);
            (op, *mode)
        }
        other => panic!("expected Attribute, got: {other:?}"),
    }
}

pub fn attribute_eq_is(criterion: &Criterion, attr: &str, expected: &str, expected_mode: Mode) {
    let (op, mode) = attribute_op(criterion, attr);
    match op {
        AttributeOp::Eq { value } => assert_eq!(value, expected),
        other => panic!("expected Eq, got: {other:?}"),
    }
    assert_eq!(mode, expected_mode);
}

pub fn attribute_in_is(criterion: &Criterion, attr: &str, expected: &[&str], expected_mode: Mode) {
    let (op, mode) = attribute_op(criterion, attr);
    match op {
        AttributeOp::In { values } => {
            let exp: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
            assert_eq!(*values, exp);
        }
        other => panic!("expected In, got: {other:?}"),
    }
    assert_eq!(mode, expected_mode);
}

pub fn attribute_range_is(criterion: &Criterion, attr: &str, lo: &str, hi: &str) {
    let (op, mode) = attribute_op(criterion, attr);
    match op {
        AttributeOp::Range { gte, lte } => {
            assert_eq!(gte, lo);
            assert_eq!(lte, hi);
        }
        other => panic!("expected Range, got: {other:?}"),
    }
    assert_eq!(mode, Mode::Include);
}

pub fn attribute_cmp_is(
    criterion: &Criterion,
    attr: &str,
    expected_op: CmpOp,
    expected: &str,
    expected_mode: Mode,
) {
    let (op, mode) = attribute_op(criterion, attr);
    match op {
        AttributeOp::Cmp { cmp, value } => {
            assert_eq!(*cmp, expected_op);
            assert_eq!(value, expected);
        }
        other => panic!("expected Cmp, got: {other:?}"),
    }
    assert_eq!(mode, expected_mode);
}
