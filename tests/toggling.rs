//! The flows the dashboard UI drives: picking a finding type, toggling
//! categorisation chips, and inserting query templates. Each flow is a
//! composition of term-editor calls over the authored text, and the text
//! must stay parseable and duplicate-free no matter how often the user
//! clicks.

mod common;
use common::*;
use search_dsl::*;

const CATEGORISATION: &str = "data.categorisation";

/// The chip-click handler: remove the term when present, append it when not.
fn toggle_categorisation(query: &str, raw_id: &str) -> String {
    let token = quote_if_needed(raw_id);
    if has_field_value_term(query, CATEGORISATION, &token) {
        remove_field_value_term(query, CATEGORISATION, &token)
    } else {
        let term = format!("{CATEGORISATION}:{token}");
        if query.is_empty() {
            term
        } else {
            normalize_spaces(&format!("{query} {term}"))
        }
    }
}

#[test]
fn selecting_a_finding_type_clears_stale_categorisations() {
    let q = "data.categorisation:security kerberos";
    let q = upsert_field_term(q, "type", "finding/vulnerability", false);
    let q = remove_field_term(&q, CATEGORISATION);
    assert_eq!(q, "kerberos type:finding/vulnerability");
    assert_eq!(
        get_single_field_value(&q, "type").as_deref(),
        Some("finding/vulnerability")
    );
}

#[test]
fn chip_toggle_is_symmetric_under_repeated_clicks() {
    let original = "type:finding/vulnerability kerberos";

    let on = toggle_categorisation(original, "security");
    assert!(has_field_value_term(&on, CATEGORISATION, "security"));

    let off = toggle_categorisation(&on, "security");
    assert_eq!(off, original);
    assert!(!has_field_value_term(&off, CATEGORISATION, "security"));

    // a full on/off/on/off cycle ends where it started
    let cycled = toggle_categorisation(&toggle_categorisation(&off, "security"), "security");
    assert_eq!(cycled, original);
}

#[test]
fn multiple_chips_toggle_independently() {
    let q = toggle_categorisation("", "security");
    let q = toggle_categorisation(&q, "compliance");
    assert!(has_field_value_term(&q, CATEGORISATION, "security"));
    assert!(has_field_value_term(&q, CATEGORISATION, "compliance"));

    let q = toggle_categorisation(&q, "security");
    assert!(!has_field_value_term(&q, CATEGORISATION, "security"));
    assert_eq!(q, "data.categorisation:compliance");
}

#[test]
fn chip_ids_with_spaces_survive_the_round_trip() {
    let q = toggle_categorisation("", "needs review");
    assert_eq!(q, "data.categorisation:\"needs review\"");

    // the quoted chip parses as one attribute value
    let criteria = parse_clean(&q);
    attribute_eq_is(&criteria[0], CATEGORISATION, "needs review", Mode::Include);

    // and toggling it off restores the empty query
    assert_eq!(toggle_categorisation(&q, "needs review"), "");
}

#[test]
fn template_insertion_is_idempotent() {
    let insert = |q: &str| {
        let q = ensure_term(q, "type:finding/vulnerability");
        upsert_field_term(&q, "data.cve", "CVE-2024-1234", false)
    };

    let once = insert("kerberos");
    assert_eq!(
        once,
        "kerberos type:finding/vulnerability data.cve:CVE-2024-1234"
    );
    assert_eq!(insert(&once), once);
}

#[test]
fn toggled_state_parses_into_expected_criteria() {
    let q = upsert_field_term("", "type", "finding/vulnerability", false);
    let q = toggle_categorisation(&q, "security");
    let q = toggle_categorisation(&q, "compliance");

    let criteria = parse_clean(&q);
    assert_eq!(criteria.len(), 2);
    attribute_eq_is(&criteria[0], "type", "finding/vulnerability", Mode::Include);
    attribute_in_is(
        &criteria[1],
        CATEGORISATION,
        &["security", "compliance"],
        Mode::Include,
    );
}
