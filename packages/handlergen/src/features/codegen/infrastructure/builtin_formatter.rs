//! Built-in Go formatter
//!
//! Validates rendered source by re-parsing it with tree-sitter-go, then
//! normalizes layout:
//! - indentation is one tab per open bracket level
//! - trailing whitespace is removed
//! - runs of blank lines collapse to one
//! - output ends with exactly one newline
//!
//! Lines that start inside a block comment or raw string are kept verbatim.

use crate::features::codegen::ports::SourceFormatter;
use crate::features::parsing::infrastructure::TreeSitterParser;
use crate::features::parsing::ports::SourceParser;
use crate::shared::models::{HandlergenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    BlockComment,
    RawString,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinGoFormatter {
    parser: TreeSitterParser,
}

impl BuiltinGoFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn reindent(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut depth: usize = 0;
        let mut state = LexState::Code;
        let mut pending_blank = false;

        for line in source.lines() {
            if state != LexState::Code {
                out.push_str(line);
                out.push('\n');
                let (next_state, delta) = scan_line(line, state);
                state = next_state;
                depth = apply_delta(depth, delta);
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                pending_blank = !out.is_empty();
                continue;
            }
            if pending_blank {
                out.push('\n');
                pending_blank = false;
            }

            let leading_closers = trimmed
                .chars()
                .take_while(|c| matches!(c, ')' | '}' | ']'))
                .count();
            let indent = depth.saturating_sub(leading_closers);
            for _ in 0..indent {
                out.push('\t');
            }
            out.push_str(trimmed);
            out.push('\n');

            let (next_state, delta) = scan_line(trimmed, state);
            state = next_state;
            depth = apply_delta(depth, delta);
        }

        out
    }
}

fn apply_delta(depth: usize, delta: isize) -> usize {
    if delta.is_negative() {
        depth.saturating_sub(delta.unsigned_abs())
    } else {
        depth + delta as usize
    }
}

/// Net bracket depth change of one line, and the lexer state at its end
fn scan_line(line: &str, mut state: LexState) -> (LexState, isize) {
    let mut delta: isize = 0;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            LexState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = LexState::Code;
                }
            }
            LexState::RawString => {
                if c == '`' {
                    state = LexState::Code;
                }
            }
            LexState::Code => match c {
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = LexState::BlockComment;
                }
                '`' => state = LexState::RawString,
                '"' | '\'' => skip_quoted(&mut chars, c),
                '(' | '{' | '[' => delta += 1,
                ')' | '}' | ']' => delta -= 1,
                _ => {}
            },
        }
    }

    (state, delta)
}

fn skip_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, quote: char) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            c if c == quote => return,
            _ => {}
        }
    }
}

impl SourceFormatter for BuiltinGoFormatter {
    fn format(&self, source: &str, filename: &str) -> Result<String> {
        self.parser.parse(source, filename).map_err(|e| {
            let mut err = HandlergenError::synthesis(format!("generated code is not valid Go: {}", e.message))
                .with_file(filename);
            if let Some(line) = e.line {
                err = err.with_line(line);
            }
            err
        })?;

        Ok(self.reindent(source))
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reindent_and_collapse_blank_lines() {
        let source = "package api\n\n\n\nimport (\n  \"fmt\"   \n)\n\nfunc init() {\n        fmt.Println(\"{\")\n}\n\n\n";
        let formatted = BuiltinGoFormatter::new().format(source, "gen.go").unwrap();
        assert_eq!(
            formatted,
            "package api\n\nimport (\n\t\"fmt\"\n)\n\nfunc init() {\n\tfmt.Println(\"{\")\n}\n"
        );
    }

    #[test]
    fn test_block_comment_kept_verbatim() {
        let source = "/*\n  @Handler(type=\"api\")\n  path = \"/x\" {\n*/\n\npackage api\n\nfunc init() {\nx := 1\n_ = x\n}\n";
        let formatted = BuiltinGoFormatter::new().format(source, "gen.go").unwrap();
        assert!(formatted.starts_with("/*\n  @Handler(type=\"api\")\n  path = \"/x\" {\n*/\n"));
        assert!(formatted.ends_with("func init() {\n\tx := 1\n\t_ = x\n}\n"));
    }

    #[test]
    fn test_invalid_go_is_synthesis_error() {
        let source = "package api\n\nfunc init() {\n\tnet_fw.NewTcpNetHandler(, nil)\n}\n";
        let err = BuiltinGoFormatter::new()
            .format(source, "gen_tcp_api_handler.go")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Synthesis);
        assert_eq!(err.file_path.as_deref(), Some("gen_tcp_api_handler.go"));
    }

    #[test]
    fn test_idempotent() {
        let source = "package api\n\nfunc init() {\n\tif true {\n\t\treturn\n\t}\n}\n";
        let formatter = BuiltinGoFormatter::new();
        let once = formatter.format(source, "a.go").unwrap();
        let twice = formatter.format(&once, "a.go").unwrap();
        assert_eq!(once, source);
        assert_eq!(twice, once);
    }
}
