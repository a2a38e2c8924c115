//! Textual, field-agnostic manipulation of query text.
//!
//! The UI never re-parses a query to toggle a filter chip; it rewrites the
//! authored text with the operations in this module and keeps the string as
//! the single source of truth. Every operation is total — bad input degrades
//! to a no-op or an empty string, never to an error — and every operation
//! ends with [`normalize_spaces`], which makes all of them idempotent.

use crate::token::{split_field_token, split_tokens};

/// Collapses any whitespace run to a single space and trims both ends.
///
/// ```
/// use search_dsl::normalize_spaces;
/// assert_eq!(normalize_spaces("  foo   bar \n baz  "), "foo bar baz");
/// assert_eq!(normalize_spaces("   "), "");
/// ```
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Wraps `value` in double quotes, escaping embedded quotes, if and only if
/// it contains whitespace or a `"` character. Empty or whitespace-only input
/// yields an empty string. The result is always a single DSL token.
///
/// ```
/// use search_dsl::quote_if_needed;
/// assert_eq!(quote_if_needed("HIGH"), "HIGH");
/// assert_eq!(quote_if_needed("foo bar"), "\"foo bar\"");
/// assert_eq!(quote_if_needed("a\"b"), "\"a\\\"b\"");
/// assert_eq!(quote_if_needed("  "), "");
/// ```
pub fn quote_if_needed(value: &str) -> String {
    let s = value.trim();
    if s.is_empty() {
        return String::new();
    }
    if s.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

/// Deletes every `field:value` and `-field:value` term for `field`,
/// quoted or bare, regardless of value.
///
/// ```
/// use search_dsl::remove_field_term;
/// assert_eq!(remove_field_term("type:a -type:b x:y", "type"), "x:y");
/// assert_eq!(remove_field_term("x:y", "type"), "x:y");
/// ```
pub fn remove_field_term(query: &str, field: &str) -> String {
    let kept: Vec<String> = split_tokens(query)
        .into_iter()
        .filter(|token| !is_term_for_field(token, field))
        .collect();
    normalize_spaces(&kept.join(" "))
}

/// Removes all existing terms for `field`, then appends exactly one new
/// `[-]field:value` term, so single-value fields end up with at most one term.
///
/// ```
/// use search_dsl::upsert_field_term;
/// assert_eq!(upsert_field_term("type:a x:y", "type", "b", false), "x:y type:b");
/// assert_eq!(upsert_field_term("", "type", "b", true), "-type:b");
/// ```
pub fn upsert_field_term(query: &str, field: &str, value: &str, exclude: bool) -> String {
    let cleaned = remove_field_term(query, field);
    let sign = if exclude { "-" } else { "" };
    let term = format!("{sign}{field}:{value}");
    if cleaned.is_empty() {
        normalize_spaces(&term)
    } else {
        normalize_spaces(&format!("{cleaned} {term}"))
    }
}

/// Deletes only the exact `field:value_token` occurrence(s), plain or
/// negated, leaving other values for the same field untouched. This is the
/// removal half of a multi-value chip toggle.
///
/// ```
/// use search_dsl::remove_field_value_term;
/// assert_eq!(remove_field_value_term("sev:LOW sev:HIGH", "sev", "LOW"), "sev:HIGH");
/// assert_eq!(remove_field_value_term("sev:HIGH", "sev", "LOW"), "sev:HIGH");
/// ```
pub fn remove_field_value_term(query: &str, field: &str, value_token: &str) -> String {
    let kept: Vec<String> = split_tokens(query)
        .into_iter()
        .filter(|token| !is_exact_term(token, field, value_token))
        .collect();
    normalize_spaces(&kept.join(" "))
}

/// Whether the query contains the exact `field:value_token` term, plain or
/// negated. Mirrors [`remove_field_value_term`]'s matching exactly so a
/// toggle button's selected state always agrees with what removal would do.
///
/// ```
/// use search_dsl::has_field_value_term;
/// assert!(has_field_value_term("-sev:LOW x:y", "sev", "LOW"));
/// assert!(!has_field_value_term("sev:LOWER", "sev", "LOW"));
/// ```
pub fn has_field_value_term(query: &str, field: &str, value_token: &str) -> bool {
    split_tokens(query)
        .iter()
        .any(|token| is_exact_term(token, field, value_token))
}

/// Returns the value of the last non-negated `field:value` term, quotes
/// intact, or `None` when the field is absent. Last-write-wins matches how
/// the grammar treats single-select fields.
///
/// ```
/// use search_dsl::get_single_field_value;
/// assert_eq!(get_single_field_value("type:a type:b", "type"), Some("b".into()));
/// assert_eq!(get_single_field_value("-type:a", "type"), None);
/// assert_eq!(get_single_field_value("cat:\"a b\"", "cat"), Some("\"a b\"".into()));
/// ```
pub fn get_single_field_value(query: &str, field: &str) -> Option<String> {
    let mut last = None;
    for token in split_tokens(query) {
        if let Some(ft) = split_field_token(&token) {
            if !ft.negated && ft.field == field && !ft.value.is_empty() {
                last = Some(ft.value.to_string());
            }
        }
    }
    last
}

/// Appends `term` verbatim unless an identical whitespace-delimited token is
/// already present. Used for template insertion where exact duplication must
/// be avoided but no field-aware replacement is wanted.
///
/// ```
/// use search_dsl::ensure_term;
/// assert_eq!(ensure_term("a:1", "type:x"), "a:1 type:x");
/// assert_eq!(ensure_term("a:1 type:x", "type:x"), "a:1 type:x");
/// ```
pub fn ensure_term(query: &str, term: &str) -> String {
    let normalized = normalize_spaces(query);
    if normalized.is_empty() {
        return term.to_string();
    }
    if split_tokens(&normalized).iter().any(|t| t == term) {
        return normalized;
    }
    normalize_spaces(&format!("{normalized} {term}"))
}

// A term counts for `field` only with a non-empty value: a dangling `field:`
// is free text, not a field term, and must survive removal.
fn is_term_for_field(token: &str, field: &str) -> bool {
    split_field_token(token).is_some_and(|ft| ft.field == field && !ft.value.is_empty())
}

fn is_exact_term(token: &str, field: &str, value_token: &str) -> bool {
    let plain = token.strip_prefix('-').unwrap_or(token);
    plain
        .strip_prefix(field)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|rest| rest == value_token)
}
