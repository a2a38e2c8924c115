//! Converts query text into ordered criteria plus field-scoped errors.
//!
//! The parse runs as a sequence of pure passes over an immutable token list,
//! each returning its matches and the remainder for the next pass:
//! comparisons, dynamic `data.*` discovery, keyword terms, negated keyword
//! terms, then free text. Later passes only ever see what earlier passes did
//! not claim, so `field:"a>b"` can never be split by the comparison pass and
//! an unknown field can never leak into free text.

use crate::criteria::{
    AttributeOp, CmpOp, Criterion, FieldCatalog, Mode, Parsed, ParseIssue, SCOPE_FIELD,
};
use crate::token::{field_name_len, is_data_path, split_field_token, split_tokens, strip_quotes};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Recognized boolean-looking words. The grammar has no boolean algebra;
/// these are dropped from free text as noise, never treated as operators.
const STOPWORDS: [&str; 3] = ["and", "or", "not"];

/// Parses query text into criteria and errors, given the caller's field
/// catalog. Never fails: malformed content surfaces as [`ParseIssue`]s, an
/// empty or whitespace-only query yields an empty [`Parsed`].
///
/// ```
/// use search_dsl::{parse_criteria, Criterion, FieldCatalog, IssueCode};
///
/// let catalog = FieldCatalog::new(["type"], [] as [&str; 0]);
/// let parsed = parse_criteria("bogus:1 type:finding/vulnerability", &catalog);
/// assert_eq!(parsed.criteria.len(), 1);
/// assert_eq!(parsed.errors.len(), 1);
/// assert_eq!(parsed.errors[0].code, IssueCode::UnknownField);
/// assert_eq!(parsed.errors[0].field, "bogus");
/// ```
pub fn parse_criteria(query: &str, catalog: &FieldCatalog) -> Parsed {
    let tokens = split_tokens(query);
    if tokens.is_empty() {
        return Parsed::default();
    }

    let (comparisons, tokens) = extract_comparisons(tokens);
    trace!(
        comparisons = comparisons.len(),
        remaining = tokens.len(),
        "comparison pass done"
    );

    let schema = EffectiveSchema::gather(&tokens, catalog);

    let mut criteria = Vec::new();
    let mut errors = Vec::new();

    for cmp in comparisons {
        if !schema.recognizes(&cmp.field) {
            errors.push(ParseIssue::unknown_field(cmp.field));
            continue;
        }
        if cmp.field == SCOPE_FIELD {
            errors.push(ParseIssue::invalid_operator(SCOPE_FIELD));
            continue;
        }
        criteria.push(Criterion::Attribute {
            attr: cmp.field,
            op: AttributeOp::Cmp {
                cmp: cmp.op,
                value: cmp.value,
            },
            mode: cmp.mode,
        });
    }

    let (include_slots, exclude_slots, free) =
        extract_field_terms(tokens, &schema, catalog, &mut errors);

    emit_slots(include_slots, Mode::Include, &mut criteria);
    emit_slots(exclude_slots, Mode::Exclude, &mut criteria);
    emit_free_text(free, &mut criteria);

    debug!(
        criteria = criteria.len(),
        errors = errors.len(),
        "query parsed"
    );
    Parsed { criteria, errors }
}

/// The field-name set one parse pass treats as recognized: the reserved scope
/// field, the catalog's fields, and every `data.*` path that appears in the
/// text. Computed once per call and threaded through the remaining passes so
/// no pass mutates shared schema state.
struct EffectiveSchema {
    keywords: BTreeSet<String>,
}

impl EffectiveSchema {
    fn gather(tokens: &[String], catalog: &FieldCatalog) -> Self {
        let mut keywords: BTreeSet<String> =
            catalog.allowed_fields().map(str::to_string).collect();
        keywords.insert(SCOPE_FIELD.to_string());
        for token in tokens {
            if let Some(ft) = split_field_token(token) {
                if is_data_path(ft.field) {
                    keywords.insert(ft.field.to_string());
                }
            }
        }
        trace!(keywords = keywords.len(), "effective schema gathered");
        EffectiveSchema { keywords }
    }

    // Comparison tokens are consumed before discovery runs, so their fields
    // can never be in the gathered set; the `data.` prefix rule keeps deeply
    // nested metadata attributes recognized there too.
    fn recognizes(&self, field: &str) -> bool {
        self.keywords.contains(field) || is_data_path(field)
    }
}

struct Comparison {
    field: String,
    op: CmpOp,
    value: String,
    mode: Mode,
}

fn extract_comparisons(tokens: Vec<String>) -> (Vec<Comparison>, Vec<String>) {
    let mut comparisons = Vec::new();
    let mut rest = Vec::new();
    for token in tokens {
        match parse_comparison(&token) {
            Some(cmp) => comparisons.push(cmp),
            None => rest.push(token),
        }
    }
    (comparisons, rest)
}

// A comparison token is `[-]field<op>value` with the operator directly after
// the field name; `field:...` tokens never match because `:` is not an
// operator character.
fn parse_comparison(token: &str) -> Option<Comparison> {
    let (mode, rest) = match token.strip_prefix('-') {
        Some(r) if !r.is_empty() => (Mode::Exclude, r),
        _ => (Mode::Include, token),
    };
    let name_len = field_name_len(rest);
    if name_len == 0 {
        return None;
    }
    let after = &rest[name_len..];
    let (op, raw) = split_leading_op(after)?;
    if raw.is_empty() {
        return None;
    }
    Some(Comparison {
        field: rest[..name_len].to_string(),
        op,
        value: strip_quotes(raw),
        mode,
    })
}

fn split_leading_op(s: &str) -> Option<(CmpOp, &str)> {
    for op in CmpOp::ORDERED {
        if let Some(rest) = s.strip_prefix(op.symbol()) {
            return Some((op, rest));
        }
    }
    None
}

/// One emission unit of the keyword passes, in first-appearance order.
/// Repeated `field:value` terms and comma lists merge into the same `Values`
/// slot; each `lo-hi` term on a range-capable field gets its own slot.
enum Slot {
    Range {
        field: String,
        gte: String,
        lte: String,
    },
    Values {
        field: String,
        values: Vec<String>,
    },
}

fn extract_field_terms(
    tokens: Vec<String>,
    schema: &EffectiveSchema,
    catalog: &FieldCatalog,
    errors: &mut Vec<ParseIssue>,
) -> (Vec<Slot>, Vec<Slot>, Vec<String>) {
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    let mut free = Vec::new();

    for token in tokens {
        let Some(ft) = split_field_token(&token) else {
            free.push(token);
            continue;
        };
        // `field:` with nothing after the colon is not a field term; it
        // falls through to free text like any other bare token.
        if ft.value.is_empty() {
            free.push(token);
            continue;
        }
        if !schema.recognizes(ft.field) {
            errors.push(ParseIssue::unknown_field(ft.field));
            continue;
        }

        // Range folding applies to plain terms only; a negated or quoted
        // `lo-hi` stays an ordinary value.
        if !ft.negated && catalog.is_range(ft.field) {
            if let Some((gte, lte)) = split_range(ft.value) {
                if ft.field == SCOPE_FIELD {
                    errors.push(ParseIssue::invalid_operator(SCOPE_FIELD));
                } else {
                    include.push(Slot::Range {
                        field: ft.field.to_string(),
                        gte,
                        lte,
                    });
                }
                continue;
            }
        }

        let values = parse_values(ft.value);
        if values.is_empty() {
            continue;
        }
        let slots = if ft.negated { &mut exclude } else { &mut include };
        let existing = slots.iter_mut().find_map(|slot| match slot {
            Slot::Values { field, values } if field.as_str() == ft.field => Some(values),
            _ => None,
        });
        match existing {
            Some(list) => list.extend(values),
            None => slots.push(Slot::Values {
                field: ft.field.to_string(),
                values,
            }),
        }
    }

    (include, exclude, free)
}

// A quoted value is always a single literal, empty string included, so
// `field:""` survives as an empty-string criterion and `field:"a,b"` is not
// split. Bare values split on commas into alternatives.
fn parse_values(raw: &str) -> Vec<String> {
    if raw.starts_with('"') || raw.starts_with('\'') {
        return vec![strip_quotes(raw)];
    }
    raw.split(',')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

// `lo-hi` with both endpoints present; commas mean a list and a quoted value
// opted out of range folding before we get here.
fn split_range(raw: &str) -> Option<(String, String)> {
    if raw.starts_with('"') || raw.starts_with('\'') || raw.contains(',') {
        return None;
    }
    let idx = raw.find('-')?;
    let (lo, hi) = (raw[..idx].trim(), raw[idx + 1..].trim());
    if lo.is_empty() || hi.is_empty() {
        return None;
    }
    Some((lo.to_string(), hi.to_string()))
}

fn emit_slots(slots: Vec<Slot>, mode: Mode, criteria: &mut Vec<Criterion>) {
    for slot in slots {
        match slot {
            Slot::Range { field, gte, lte } => criteria.push(Criterion::Attribute {
                attr: field,
                op: AttributeOp::Range { gte, lte },
                mode,
            }),
            Slot::Values { field, mut values } => {
                if field == SCOPE_FIELD {
                    for value in values {
                        criteria.push(Criterion::Scope { value, mode });
                    }
                } else if values.len() > 1 {
                    criteria.push(Criterion::Attribute {
                        attr: field,
                        op: AttributeOp::In { values },
                        mode,
                    });
                } else {
                    let value = values.pop().expect("values slot is never empty");
                    criteria.push(Criterion::Attribute {
                        attr: field,
                        op: AttributeOp::Eq { value },
                        mode,
                    });
                }
            }
        }
    }
}

fn emit_free_text(tokens: Vec<String>, criteria: &mut Vec<Criterion>) {
    let mut seen = BTreeSet::new();
    for token in tokens {
        let (mode, rest) = if token.len() > 1 && token.starts_with('-') {
            (Mode::Exclude, &token[1..])
        } else {
            (Mode::Include, token.as_str())
        };
        let value = strip_quotes(rest);
        if value.is_empty() {
            continue;
        }
        if STOPWORDS.iter().any(|s| value.eq_ignore_ascii_case(s)) {
            continue;
        }
        // Case-insensitive dedup, first occurrence wins and keeps its mode.
        if !seen.insert(value.to_lowercase()) {
            continue;
        }
        criteria.push(Criterion::Fulltext { value, mode });
    }
}
