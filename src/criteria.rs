//! Structured output of the criteria parser, shaped so a serialized
//! [`Criterion`] matches the search-execution endpoint's wire format
//! byte-for-byte (modulo key order).

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// The reserved field restricting results to a named component context.
/// It only ever produces [`Criterion::Scope`] and rejects comparison and
/// range operators.
pub const SCOPE_FIELD: &str = "ocm";

/// Include/exclude flag derived from a leading `-` on the source token.
/// Serialized only when set to exclude; the wire format leaves include
/// implicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Include,
    Exclude,
}

impl Mode {
    pub fn is_include(&self) -> bool {
        matches!(self, Mode::Include)
    }
}

/// Comparison operator of a `field<op>value` token, serialized as the
/// operator literal itself (`">="`, `"!="`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CmpOp {
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
}

impl CmpOp {
    /// All operators, two-character forms first so `>=` is never read as
    /// `>` followed by a stray `=`.
    pub const ORDERED: [CmpOp; 6] = [
        CmpOp::Ge,
        CmpOp::Le,
        CmpOp::Eq,
        CmpOp::Ne,
        CmpOp::Gt,
        CmpOp::Lt,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Operator payload of an attribute criterion.
///
/// `Eq` and `In` come from `field:value` terms (comma lists and repeated
/// terms fold into `In`), `Range` from `field:lo-hi` on a range-capable
/// field, `Cmp` from a comparison token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum AttributeOp {
    Eq { value: String },
    In { values: Vec<String> },
    Range { gte: String, lte: String },
    Cmp { cmp: CmpOp, value: String },
}

/// One structured, typed search condition produced by parsing.
///
/// ```
/// use search_dsl::{parse_criteria, Criterion, FieldCatalog, Mode};
///
/// let catalog = FieldCatalog::new(["type"], [] as [&str; 0]);
/// let parsed = parse_criteria("type:finding/vulnerability kerberos", &catalog);
/// assert!(matches!(&parsed.criteria[0], Criterion::Attribute { attr, .. } if attr == "type"));
/// assert!(matches!(&parsed.criteria[1], Criterion::Fulltext { value, mode }
///     if value == "kerberos" && mode.is_include()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Criterion {
    /// Component-context restriction from the reserved `ocm` field.
    #[serde(rename = "ocm")]
    Scope {
        value: String,
        #[serde(skip_serializing_if = "Mode::is_include")]
        mode: Mode,
    },
    /// Condition on a recognized metadata attribute, possibly a dotted path
    /// such as `data.cve`.
    #[serde(rename = "artefact-metadata")]
    Attribute {
        attr: String,
        #[serde(flatten)]
        op: AttributeOp,
        #[serde(skip_serializing_if = "Mode::is_include")]
        mode: Mode,
    },
    /// Bare free-text term.
    #[serde(rename = "fulltext")]
    Fulltext {
        value: String,
        #[serde(skip_serializing_if = "Mode::is_include")]
        mode: Mode,
    },
}

/// Error codes for field-scoped parse problems. Both are non-fatal: the rest
/// of the query still parses and its criteria are still returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// A field token references a name the current schema does not recognize.
    UnknownField,
    /// A comparison or range operator was applied to the reserved scope
    /// field.
    InvalidOperator,
}

/// A field-scoped parse problem. The caller decides policy — typically
/// rendering unknown fields as a warning and blocking execution while the
/// user keeps editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    pub code: IssueCode,
    pub field: String,
}

impl ParseIssue {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        ParseIssue {
            code: IssueCode::UnknownField,
            field: field.into(),
        }
    }

    pub fn invalid_operator(field: impl Into<String>) -> Self {
        ParseIssue {
            code: IssueCode::InvalidOperator,
            field: field.into(),
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            IssueCode::UnknownField => write!(f, "unknown field `{}`", self.field),
            IssueCode::InvalidOperator => write!(
                f,
                "field `{}` does not support comparison or range operators",
                self.field
            ),
        }
    }
}

impl std::error::Error for ParseIssue {}

/// The fields the caller currently accepts, as supplied by the field-metadata
/// endpoint: the recognized names plus the subset whose `lo-hi` values fold
/// into a single range criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    allowed: BTreeSet<String>,
    ranges: BTreeSet<String>,
}

impl FieldCatalog {
    /// ```
    /// use search_dsl::FieldCatalog;
    /// let catalog = FieldCatalog::new(["type", "data.score"], ["data.score"]);
    /// assert!(catalog.allows("type"));
    /// assert!(catalog.is_range("data.score"));
    /// assert!(!catalog.is_range("type"));
    /// ```
    pub fn new<A, R>(allowed: A, ranges: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        FieldCatalog {
            allowed: allowed.into_iter().map(Into::into).collect(),
            ranges: ranges.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, field: &str) -> bool {
        self.allowed.contains(field)
    }

    pub fn is_range(&self, field: &str) -> bool {
        self.ranges.contains(field)
    }

    pub fn allowed_fields(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}

/// Result of one parse pass: the ordered criteria that could be produced and
/// every field-scoped problem found along the way. Recomputed from the query
/// text on every invocation; nothing here is ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parsed {
    pub criteria: Vec<Criterion>,
    pub errors: Vec<ParseIssue>,
}

impl Parsed {
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty() && self.errors.is_empty()
    }
}
