//! # Artefact search query DSL
//!
//! `search-dsl` is the query core of the compliance dashboard's metadata
//! search: a single line of authored text such as
//! `type:finding/vulnerability data.severity:HIGH -data.cve:CVE-2021-1`
//! is turned, deterministically, into the structured criteria the search
//! endpoint consumes — and UI actions such as clicking a filter chip rewrite
//! that same text without disturbing anything else the user typed.
//!
//! Two components share one tokenizer:
//!
//! - the **term editor** ([`upsert_field_term`], [`remove_field_value_term`],
//!   ...): pure string-to-string transforms over `field:value` tokens, all
//!   idempotent, none fallible;
//! - the **criteria parser** ([`parse_criteria`]): staged extraction of
//!   comparisons, keyword terms, negated terms, and free text into
//!   [`Criterion`]s plus field-scoped [`ParseIssue`]s.
//!
//! ## Example
//! ```
//! use search_dsl::{
//!     has_field_value_term, parse_criteria, upsert_field_term, AttributeOp, Criterion,
//!     FieldCatalog, Mode,
//! };
//!
//! // A chip click rewrites the text...
//! let query = upsert_field_term("kerberos", "type", "finding/vulnerability", false);
//! assert_eq!(query, "kerberos type:finding/vulnerability");
//! assert!(has_field_value_term(&query, "type", "finding/vulnerability"));
//!
//! // ...and parsing the text yields criteria for the search endpoint.
//! let catalog = FieldCatalog::new(["type"], [] as [&str; 0]);
//! let parsed = parse_criteria(&query, &catalog);
//! assert!(parsed.errors.is_empty());
//! assert_eq!(
//!     parsed.criteria,
//!     vec![
//!         Criterion::Attribute {
//!             attr: "type".into(),
//!             op: AttributeOp::Eq { value: "finding/vulnerability".into() },
//!             mode: Mode::Include,
//!         },
//!         Criterion::Fulltext { value: "kerberos".into(), mode: Mode::Include },
//!     ],
//! );
//! ```
//!
//! Both components are pure and synchronous: every call works on its own
//! snapshot of the input and allocates fresh output, so concurrent callers
//! (a debounced live-lint pass racing an explicit run) can never interfere.

mod criteria;
mod editor;
mod parser;
mod prefill;
mod token;

pub use criteria::{
    AttributeOp, CmpOp, Criterion, FieldCatalog, IssueCode, Mode, ParseIssue, Parsed, SCOPE_FIELD,
};
pub use editor::{
    ensure_term, get_single_field_value, has_field_value_term, normalize_spaces, quote_if_needed,
    remove_field_term, remove_field_value_term, upsert_field_term,
};
pub use parser::parse_criteria;
pub use prefill::build_prefill_text;
