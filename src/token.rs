//! Quote-aware tokenizing helpers shared by the term editor and the criteria
//! parser. Both sides must agree on token boundaries or chip toggling and
//! parsing would disagree about what counts as one term, so this is the only
//! place that knows the quoting rules.

/// One `field:value` shaped token, split into its parts. `value` is the raw
/// text after the colon, quotes intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldToken<'a> {
    pub negated: bool,
    pub field: &'a str,
    pub value: &'a str,
}

/// Splits query text into whitespace-delimited tokens. Quoted phrases (single
/// or double quotes) are kept as one token including their internal
/// whitespace; `\"` escapes a quote inside a double-quoted phrase.
///
/// Quote characters only open a phrase at a token boundary, after a leading
/// `-`, or directly after `:` or a comparison-operator character — an
/// apostrophe inside a bare word stays literal, so `don't` is one token.
///
/// A missing closing quote never fails; the phrase simply runs to the end of
/// the input. Malformed text is the parser's problem, not the tokenizer's.
pub(crate) fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_whitespace() {
            if !buf.is_empty() {
                tokens.push(std::mem::take(&mut buf));
            }
            continue;
        }

        if (ch == '"' || ch == '\'') && quote_can_open(&buf) {
            buf.push(ch);
            while let Some(c) = chars.next() {
                buf.push(c);
                if c == '\\' && ch == '"' {
                    if let Some(&escaped) = chars.peek() {
                        buf.push(escaped);
                        chars.next();
                    }
                    continue;
                }
                if c == ch {
                    break;
                }
            }
            continue;
        }

        buf.push(ch);
    }

    if !buf.is_empty() {
        tokens.push(buf);
    }
    tokens
}

// Phrases open at a token boundary, after a leading `-`, or after `:` and
// comparison-operator characters, so `cat:"a b"` and `version!="1 2"` stay
// single tokens while a mid-word apostrophe stays literal.
fn quote_can_open(buf: &str) -> bool {
    buf.is_empty() || buf == "-" || buf.ends_with([':', '=', '<', '>'])
}

/// Removes one layer of surrounding quotes from a value token. Double-quoted
/// values also get `\"` unescaped; single-quoted values are taken verbatim.
/// Anything else is returned trimmed.
pub(crate) fn strip_quotes(token: &str) -> String {
    let t = token.trim();
    if t.len() >= 2 {
        if t.starts_with('"') && t.ends_with('"') {
            return t[1..t.len() - 1].replace("\\\"", "\"");
        }
        if t.starts_with('\'') && t.ends_with('\'') {
            return t[1..t.len() - 1].to_string();
        }
    }
    t.to_string()
}

/// Length of the leading field-name run: `[A-Za-z_]` then `[A-Za-z0-9_.]*`.
/// Returns 0 when `s` does not start with a field name.
pub(crate) fn field_name_len(s: &str) -> usize {
    let mut iter = s.char_indices();
    match iter.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    for (i, c) in iter {
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '.') {
            return i;
        }
    }
    s.len()
}

/// Interprets a token as `[-]field:value`. The value may be empty (`type:`)
/// or quoted; callers decide what an empty value means. Returns `None` when
/// the token has no field-name prefix followed by `:`.
pub(crate) fn split_field_token(token: &str) -> Option<FieldToken<'_>> {
    let (negated, rest) = match token.strip_prefix('-') {
        Some(r) if !r.is_empty() => (true, r),
        _ => (false, token),
    };
    let name_len = field_name_len(rest);
    if name_len == 0 {
        return None;
    }
    let value = rest[name_len..].strip_prefix(':')?;
    Some(FieldToken {
        negated,
        field: &rest[..name_len],
        value,
    })
}

/// `data.<path>` names are open-ended metadata attributes: anything under the
/// `data.` prefix with a plausible path is recognized without being declared
/// in the field catalog.
pub(crate) fn is_data_path(field: &str) -> bool {
    field
        .strip_prefix("data.")
        .is_some_and(|rest| rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_'))
}
