//! SQL identifier escaping.
//!
//! Every table, column and schema name that reaches generated SQL goes through
//! [`escape_identifier`]. The name is wrapped in double quotes and embedded
//! `"` characters are doubled, so the result is always a single quoted
//! identifier that Oracle will not case-fold.
//!
//! Identifiers are expected to come from schema introspection or fixed
//! configuration, never from end-user filter input. No other validation is
//! performed.
//!
//! # Example
//! ```
//! use oraqb::ident::escape_identifier;
//!
//! assert_eq!(escape_identifier("EMP"), r#""EMP""#);
//! assert_eq!(escape_identifier(r#"a"b"#), r#""a""b""#);
//! ```

/// Quote `name` as a SQL identifier.
pub fn escape_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_identifier(name, &mut out);
    out
}

pub(crate) fn write_identifier(name: &str, out: &mut String) {
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

/// Reverse [`escape_identifier`].
///
/// Returns `None` when `quoted` is not a single well-formed quoted identifier
/// (missing surrounding quotes, or an undoubled `"` inside).
pub fn unescape_identifier(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;

    let mut name = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            // Escaped quote: ""
            if chars.next() != Some('"') {
                return None;
            }
        }
        name.push(ch);
    }
    Some(name)
}

/// Escape an optional schema prefix followed by a name: `"SCHEMA"."NAME"`.
pub fn qualified_identifier(schema: Option<&str>, name: &str) -> String {
    let mut out = String::new();
    if let Some(schema) = schema.filter(|s| !s.is_empty()) {
        write_identifier(schema, &mut out);
        out.push('.');
    }
    write_identifier(name, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        assert_eq!(escape_identifier("users"), r#""users""#);
    }

    #[test]
    fn ident_doubles_embedded_quote() {
        assert_eq!(escape_identifier(r#"has"quote"#), r#""has""quote""#);
        assert_eq!(escape_identifier(r#""""#), r#""""""""#);
    }

    #[test]
    fn ident_keeps_spaces_and_keywords() {
        assert_eq!(escape_identifier("ORDER DATE"), r#""ORDER DATE""#);
        assert_eq!(escape_identifier("select"), r#""select""#);
    }

    #[test]
    fn ident_round_trip_is_stable() {
        for raw in ["EMP", r#"a"b"#, r#"""#, "", "x\"\"y", "ünïcødé"] {
            let escaped = escape_identifier(raw);
            let back = unescape_identifier(&escaped).unwrap();
            assert_eq!(back, raw);
            assert_eq!(escape_identifier(&back), escaped);
        }
    }

    #[test]
    fn unescape_rejects_malformed() {
        assert_eq!(unescape_identifier("EMP"), None);
        assert_eq!(unescape_identifier(r#""a"b""#), None);
        assert_eq!(unescape_identifier(r#"""#), None);
    }

    #[test]
    fn qualified_with_and_without_schema() {
        assert_eq!(qualified_identifier(None, "EMP"), r#""EMP""#);
        assert_eq!(qualified_identifier(Some(""), "EMP"), r#""EMP""#);
        assert_eq!(
            qualified_identifier(Some("HR"), "EMP"),
            r#""HR"."EMP""#
        );
    }
}
