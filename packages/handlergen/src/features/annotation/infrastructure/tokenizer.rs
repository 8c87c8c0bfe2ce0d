//! Directive tokenizer
//!
//! Grammar of one directive line:
//!
//! ```text
//! @Handler ( key = value { , key = value } )
//! ```
//!
//! Values are either bare words (`bodyLimit=0`) or double-quoted strings that
//! may contain `,`, `=`, `|` and backslash-escaped quotes. Empty segments
//! (`a="1",,b="2"`) are skipped.

use thiserror::Error;

use crate::features::annotation::domain::HANDLER_MARKER;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("directive arguments must be enclosed in parentheses")]
    MissingParens,

    #[error("unterminated quote in directive")]
    UnterminatedQuote,

    #[error("missing '=' in segment '{0}'")]
    MissingEquals(String),

    #[error("empty key in segment '{0}'")]
    EmptyKey(String),

    #[error("duplicate key '{0}'")]
    DuplicateKey(String),

    #[error("missing 'type' field")]
    MissingType,
}

/// Strip the comment marker from a raw doc line.
///
/// Handles `// text` and single-line `/* text */`.
pub fn strip_comment_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("//") {
        return rest.trim_start();
    }
    if let Some(rest) = line.strip_prefix("/*") {
        return rest.strip_suffix("*/").unwrap_or(rest).trim();
    }
    line
}

/// Directive text (`@Handler(...)`) of a doc line, if the line is a directive
pub fn directive_text(doc_line: &str) -> Option<&str> {
    let text = strip_comment_marker(doc_line);
    text.starts_with(HANDLER_MARKER).then_some(text)
}

/// Remove one pair of surrounding double quotes, if present
pub fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Tokenize a directive into ordered `(key, rawValue)` pairs.
///
/// Raw values are trimmed but keep their quotes. The `type` key must be
/// present; keys must be unique.
pub fn parse_directive(text: &str) -> Result<Vec<(String, String)>, DirectiveError> {
    let body = text
        .trim()
        .strip_prefix(HANDLER_MARKER)
        .unwrap_or(text)
        .trim();
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or(DirectiveError::MissingParens)?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for segment in split_outside_quotes(inner, ',')? {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let eq = find_outside_quotes(segment, '=')
            .ok_or_else(|| DirectiveError::MissingEquals(segment.to_string()))?;
        let key = segment[..eq].trim();
        let value = segment[eq + 1..].trim();

        if key.is_empty() {
            return Err(DirectiveError::EmptyKey(segment.to_string()));
        }
        if pairs.iter().any(|(k, _)| k == key) {
            return Err(DirectiveError::DuplicateKey(key.to_string()));
        }
        pairs.push((key.to_string(), value.to_string()));
    }

    if !pairs.iter().any(|(k, _)| k == "type") {
        return Err(DirectiveError::MissingType);
    }
    Ok(pairs)
}

/// Split on `sep` outside double quotes
fn split_outside_quotes(text: &str, sep: char) -> Result<Vec<&str>, DirectiveError> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            c if c == sep && !in_quote => {
                segments.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }

    if in_quote {
        return Err(DirectiveError::UnterminatedQuote);
    }
    segments.push(&text[start..]);
    Ok(segments)
}

fn find_outside_quotes(text: &str, target: char) -> Option<usize> {
    let mut in_quote = false;
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            c if c == target && !in_quote => return Some(idx),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_api_directive() {
        let parsed = parse_directive(
            r#"@Handler(type="api", net="http", path="/foo", resp="object", validation="token", bodyLimit=0)"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            pairs(&[
                ("type", "\"api\""),
                ("net", "\"http\""),
                ("path", "\"/foo\""),
                ("resp", "\"object\""),
                ("validation", "\"token\""),
                ("bodyLimit", "0"),
            ])
        );
    }

    #[test]
    fn test_quoted_values_keep_separators() {
        let parsed =
            parse_directive(r#"@Handler(type="api", path="/a,b=c", dataPtrStruct="app/model|model.Req")"#)
                .unwrap();
        assert_eq!(parsed[1], ("path".to_string(), "\"/a,b=c\"".to_string()));
        assert_eq!(parsed[2].1, "\"app/model|model.Req\"");
    }

    #[test]
    fn test_escaped_quote_inside_value() {
        let parsed = parse_directive(r#"@Handler(type="api", path="/a\"b")"#).unwrap();
        assert_eq!(parsed[1].1, r#""/a\"b""#);
    }

    #[test]
    fn test_empty_segments_skipped() {
        let parsed = parse_directive(r#"@Handler(type="api",, net="tcp",)"#).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_directive(r#"@Handler type="api""#),
            Err(DirectiveError::MissingParens)
        );
        assert_eq!(
            parse_directive(r#"@Handler(type="api)"#),
            Err(DirectiveError::UnterminatedQuote)
        );
        assert_eq!(
            parse_directive(r#"@Handler(type="api", resp)"#),
            Err(DirectiveError::MissingEquals("resp".to_string()))
        );
        assert_eq!(
            parse_directive(r#"@Handler(type="api", ="x")"#),
            Err(DirectiveError::EmptyKey("=\"x\"".to_string()))
        );
        assert_eq!(
            parse_directive(r#"@Handler(type="api", net="tcp", net="udp")"#),
            Err(DirectiveError::DuplicateKey("net".to_string()))
        );
        assert_eq!(
            parse_directive(r#"@Handler(net="tcp")"#),
            Err(DirectiveError::MissingType)
        );
    }

    #[test]
    fn test_directive_text() {
        assert_eq!(
            directive_text(r#"//   @Handler(type="api")"#),
            Some(r#"@Handler(type="api")"#)
        );
        assert_eq!(
            directive_text(r#"/* @Handler(type="api") */"#),
            Some(r#"@Handler(type="api")"#)
        );
        assert_eq!(directive_text("// Foo does things"), None);
        assert_eq!(directive_text("// see @Handler docs"), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"http\""), "http");
        assert_eq!(unquote(" 7 "), "7");
        assert_eq!(unquote("\""), "\"");
    }
}
