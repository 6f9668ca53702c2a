//! Attribute token parser
//!
//! Turns an attribute string such as
//!
//! ```text
//! notnull default=4.99 type=DECIMAL(4,2) sqlite:type=REAL references={language onupdate=cascade}
//! ```
//!
//! into a flat list of [`Attribute`]s. Splitting happens on whitespace that
//! is not inside `{}`, `()` or a `'...'` literal. A `dialect:` prefix scopes a
//! single token, and `dialect:{...}` scopes every token inside the group.
//!
//! The parser knows nothing about which keys are valid; that is the
//! interpreter's job.

use ddlforge_core::Dialect;
use thiserror::Error;

/// A token that could not be parsed, without table/field context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TokenError {
    /// The offending token (or the whole input when the token is unknown)
    pub token: String,
    /// What went wrong
    pub message: String,
}

impl TokenError {
    fn new(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Attribute
// ============================================================================

/// One parsed attribute token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Dialect scope, if the token was prefixed with `dialect:`
    pub dialect: Option<Dialect>,

    /// Lowercased key
    pub key: String,

    /// Value after `=`, verbatim (braces included)
    pub value: Option<String>,

    /// The token as written, for error messages
    pub raw: String,
}

impl Attribute {
    /// True for a bare `key` with no value
    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }

    /// The value with one pair of surrounding braces removed, if any
    pub fn unbraced_value(&self) -> Option<&str> {
        self.value.as_deref().map(strip_braces)
    }
}

/// Remove one pair of surrounding `{}` and trim
pub fn strip_braces(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
        .unwrap_or(trimmed)
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse an attribute string into attributes, in order
pub fn parse_attributes(input: &str) -> Result<Vec<Attribute>, TokenError> {
    let mut attributes = Vec::new();
    for token in split_tokens(input)? {
        parse_token(&token, None, &mut attributes)?;
    }
    Ok(attributes)
}

fn parse_token(
    token: &str,
    scope: Option<Dialect>,
    out: &mut Vec<Attribute>,
) -> Result<(), TokenError> {
    if let Some((prefix, rest)) = split_dialect_prefix(token) {
        if scope.is_some() {
            return Err(TokenError::new(
                token,
                "dialect prefixes cannot be nested inside a dialect group",
            ));
        }
        let dialect = Dialect::parse(prefix).map_err(|_| {
            TokenError::new(token, format!("unknown dialect prefix '{}'", prefix))
        })?;

        if rest.starts_with('{') {
            if !rest.ends_with('}') {
                return Err(TokenError::new(token, "unterminated dialect group"));
            }
            for inner in split_tokens(strip_braces(rest))? {
                parse_token(&inner, Some(dialect), out)?;
            }
            return Ok(());
        }
        return parse_key_value(token, rest, Some(dialect), out);
    }

    parse_key_value(token, token, scope, out)
}

fn parse_key_value(
    raw: &str,
    body: &str,
    dialect: Option<Dialect>,
    out: &mut Vec<Attribute>,
) -> Result<(), TokenError> {
    let (key, value) = match body.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (body, None),
    };

    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(TokenError::new(raw, format!("malformed attribute key '{}'", key)));
    }
    if value.is_some_and(|v| v.trim().is_empty()) {
        return Err(TokenError::new(raw, format!("missing value for '{}'", key)));
    }

    out.push(Attribute {
        dialect,
        key: key.to_ascii_lowercase(),
        value: value.map(str::to_string),
        raw: raw.to_string(),
    });
    Ok(())
}

/// Split `dialect:rest` when the part before the first `:` is a bare word
/// that appears before any `=`, brace or quote.
fn split_dialect_prefix(token: &str) -> Option<(&str, &str)> {
    let colon = token.find(':')?;
    let prefix = &token[..colon];
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((prefix, &token[colon + 1..]))
}

/// Split on top-level whitespace.
///
/// Braces and parentheses must balance and quotes must close; `''` inside a
/// literal is an escaped quote and needs no special handling.
pub fn split_tokens(input: &str) -> Result<Vec<String>, TokenError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut stack: Vec<char> = Vec::new();
    let mut in_quote = false;

    for c in input.chars() {
        if in_quote {
            current.push(c);
            if c == '\'' {
                in_quote = false;
            }
            continue;
        }

        match c {
            '\'' => {
                in_quote = true;
                current.push(c);
            }
            '{' | '(' => {
                stack.push(c);
                current.push(c);
            }
            '}' | ')' => {
                let expected = if c == '}' { '{' } else { '(' };
                if stack.pop() != Some(expected) {
                    current.push(c);
                    return Err(TokenError::new(current, format!("unbalanced '{}'", c)));
                }
                current.push(c);
            }
            c if c.is_whitespace() && stack.is_empty() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if in_quote {
        return Err(TokenError::new(current, "unterminated quoted string"));
    }
    if let Some(open) = stack.last() {
        return Err(TokenError::new(current, format!("unclosed '{}'", open)));
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Split a comma-separated list at top level (commas inside parentheses or
/// quotes stay put). Empty items are dropped.
pub fn split_list(input: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_quote = false;

    for c in input.chars() {
        match c {
            '\'' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote => depth = depth.saturating_sub(1),
            ',' if !in_quote && depth == 0 => {
                let item = current.trim();
                if !item.is_empty() {
                    items.push(item.to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    let item = current.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
    items
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(attrs: &[Attribute]) -> Vec<&str> {
        attrs.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn test_flags_and_values() {
        let attrs = parse_attributes("primarykey notnull len=255").unwrap();
        assert_eq!(keys(&attrs), ["primarykey", "notnull", "len"]);
        assert!(attrs[0].is_flag());
        assert_eq!(attrs[2].value.as_deref(), Some("255"));
        assert!(attrs.iter().all(|a| a.dialect.is_none()));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_attributes("").unwrap().is_empty());
        assert!(parse_attributes("   ").unwrap().is_empty());
    }

    #[test]
    fn test_braced_value_keeps_inner_spaces() {
        let attrs =
            parse_attributes("notnull references={language onupdate=cascade ondelete=restrict index}")
                .unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(
            attrs[1].unbraced_value(),
            Some("language onupdate=cascade ondelete=restrict index")
        );
    }

    #[test]
    fn test_parentheses_and_quotes_do_not_split() {
        let attrs = parse_attributes("type=DECIMAL(5, 2) default='hello world'").unwrap();
        assert_eq!(attrs[0].value.as_deref(), Some("DECIMAL(5, 2)"));
        assert_eq!(attrs[1].value.as_deref(), Some("'hello world'"));
    }

    #[test]
    fn test_dialect_prefixed_token() {
        let attrs = parse_attributes("type=DECIMAL(4,2) sqlite:type=REAL").unwrap();
        assert_eq!(attrs[0].dialect, None);
        assert_eq!(attrs[1].dialect, Some(Dialect::Sqlite));
        assert_eq!(attrs[1].key, "type");
        assert_eq!(attrs[1].value.as_deref(), Some("REAL"));
        assert_eq!(attrs[1].raw, "sqlite:type=REAL");
    }

    #[test]
    fn test_dialect_group() {
        let attrs = parse_attributes("mysql:{type=TINYTEXT notnull}").unwrap();
        assert_eq!(keys(&attrs), ["type", "notnull"]);
        assert!(attrs.iter().all(|a| a.dialect == Some(Dialect::MySql)));
    }

    #[test]
    fn test_colon_inside_value_is_not_a_prefix() {
        let attrs = parse_attributes("default='12:00' type=x").unwrap();
        assert_eq!(attrs[0].dialect, None);
        assert_eq!(attrs[0].value.as_deref(), Some("'12:00'"));
    }

    #[test]
    fn test_unknown_dialect_prefix() {
        let err = parse_attributes("oracle:type=NUMBER").unwrap_err();
        assert_eq!(err.token, "oracle:type=NUMBER");
        assert!(err.message.contains("oracle"));
    }

    #[test]
    fn test_nested_dialect_prefix_rejected() {
        assert!(parse_attributes("mysql:{postgres:type=x}").is_err());
    }

    #[test]
    fn test_unbalanced_input() {
        assert!(parse_attributes("references={language").is_err());
        assert!(parse_attributes("type=INT)").is_err());
        assert!(parse_attributes("default='oops").is_err());
    }

    #[test]
    fn test_malformed_keys() {
        assert!(parse_attributes("=5").is_err());
        assert!(parse_attributes("len=").is_err());
        assert!(parse_attributes("no-dash").is_err());
    }

    #[test]
    fn test_split_list_respects_parentheses() {
        assert_eq!(split_list("a, b,c"), ["a", "b", "c"]);
        assert_eq!(split_list("lower(a, b),c"), ["lower(a, b)", "c"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_strip_braces() {
        assert_eq!(strip_braces("{ a b }"), "a b");
        assert_eq!(strip_braces("plain"), "plain");
    }
}
